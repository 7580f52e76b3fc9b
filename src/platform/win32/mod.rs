//=========================================================================
// Win32 Backend
//
// Native windows on Windows through the `windows` crate.
//
// Layout:
// - `consts`, `keymap`, `hit_test`, `translate`, `queue`: message
//   translation in plain Rust, built and tested on every host
// - `native`: HWND ownership, window class, message pump (Windows only)
//
//=========================================================================

//=== Submodules ==========================================================

mod consts;
mod keymap;
#[cfg_attr(not(windows), allow(dead_code))]
mod queue;
mod translate;

#[cfg(windows)]
mod native;

//=== Public Exports ======================================================

pub use hit_test::{hit_test, HitTestConfig};
pub use keymap::key_from_vk;
pub use translate::{NativeMessage, NativeWindow, RawInputPacket, Translation, Win32Translator};

#[cfg(windows)]
pub use native::{Win32EventQueue, Win32Window};
