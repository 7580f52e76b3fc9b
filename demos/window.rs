//=========================================================================
// Window Demo
//
// Opens a window, polls its event queue once per frame and logs what
// arrives. A second thread receives the same events over a channel.
//
// Run with:
//   RUST_LOG=debug cargo run --example window
//
// Escape closes the window.
//
//=========================================================================

use std::thread;
use std::time::Duration;

use crossbeam_channel::unbounded;
use crosswin::event::{ButtonState, Key, KeyboardData};
use crosswin::prelude::*;
use log::{info, LevelFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut queue = EventQueue::new()?;
    let mut window = Window::new();

    let desc = WindowDesc::new("crosswin-demo")
        .with_title("crosswin demo")
        .with_size(960, 540);
    window.create(&desc, &mut queue)?;

    //--- Off-thread consumer ----------------------------------------------

    let (sender, receiver) = unbounded();
    window.forward_to(sender);

    let watcher = thread::spawn(move || {
        let mut received = 0_usize;
        for event in receiver {
            received += 1;
            if event.event_type() == EventType::Close {
                break;
            }
        }
        received
    });

    //--- Frame loop -------------------------------------------------------

    while window.state() == WindowState::Created {
        queue.update();

        while let Some(event) = queue.pop() {
            match event.data {
                EventData::Keyboard(KeyboardData {
                    key: Key::Escape,
                    state: ButtonState::Pressed,
                    ..
                }) => window.close(),
                EventData::MouseMove(_) | EventData::MouseRaw(_) | EventData::Paint => {}
                data => info!("{:?}", data),
            }
        }

        thread::sleep(Duration::from_millis(16));
    }

    // Dropping the window closes the channel if no Close event made it.
    drop(window);
    let received = watcher.join().unwrap_or_default();
    info!("Watcher thread received {} events", received);

    Ok(())
}
