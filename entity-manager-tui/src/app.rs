//! Main loop

use std::time::Duration;

use anyhow::Result;

use crate::event;
use crate::model::App;
use crate::update;
use crate::util::Term;
use crate::view;

pub fn run(terminal: &mut Term, app: &mut App) -> Result<()> {
    loop {
        // 1. Draw
        terminal.draw(|frame| {
            view::render(app, frame);
        })?;

        // 2. Quit requested?
        if app.should_quit {
            break;
        }

        // 3. A rename just succeeded: its message is on screen, now settle and reload
        if app.manager.pending().is_some() {
            app.settle();
            continue;
        }

        // 4. Poll with a 100ms timeout
        if let Some(event) = event::poll_event(Duration::from_millis(100))? {
            // 5. Translate into a message
            let msg = event::handle_event(event, app);

            // 6. Apply it
            update::update(app, msg);
        }
    }

    Ok(())
}
