//! Rename and bulk rename dialogs

use entity_manager_core::services::{Modal, RenameField};
use entity_manager_core::{Command, CoreError, CoreResult};

use crate::message::ModalMessage;
use crate::model::{App, BulkField};

pub fn update(app: &mut App, msg: ModalMessage) {
    match app.manager.modal() {
        Some(Modal::Rename(_)) => handle_rename(app, msg),
        Some(Modal::BulkRename(_)) => handle_bulk_rename(app, msg),
        None => {}
    }
}

fn handle_rename(app: &mut App, msg: ModalMessage) {
    let Some(Modal::Rename(session)) = app.manager.modal() else {
        return;
    };
    let focus = session.focus;
    let mut value = match focus {
        RenameField::Name => session.name_input.clone(),
        RenameField::EntityId => session.new_id_input.clone(),
    };

    match msg {
        ModalMessage::Close => app.dispatch(Command::CloseModal),

        ModalMessage::NextField | ModalMessage::PrevField => {
            ignore_rejection(app.manager.toggle_rename_field());
        }

        ModalMessage::Input(c) => {
            value.push(c);
            set_rename_input(app, focus, &value);
        }

        ModalMessage::Backspace => {
            value.pop();
            set_rename_input(app, focus, &value);
        }

        ModalMessage::Confirm => {
            // Outcome lands in the dialog's inline message
            let result = app.runtime.block_on(app.manager.submit_rename());
            ignore_rejection(result);
        }

        ModalMessage::ToggleTarget => {}
    }
}

fn set_rename_input(app: &mut App, focus: RenameField, value: &str) {
    let result = match focus {
        RenameField::Name => app.manager.set_rename_name(value),
        RenameField::EntityId => app.manager.set_rename_new_id(value),
    };
    ignore_rejection(result);
}

fn handle_bulk_rename(app: &mut App, msg: ModalMessage) {
    let Some(Modal::BulkRename(session)) = app.manager.modal() else {
        return;
    };
    let target = session.target();
    let mut find = session.find().to_string();
    let mut replace = session.replace().to_string();

    match msg {
        ModalMessage::Close => {
            app.dispatch(Command::CloseModal);
            app.bulk_field = BulkField::default();
        }

        ModalMessage::NextField => app.bulk_field = app.bulk_field.next(),

        ModalMessage::PrevField => app.bulk_field = app.bulk_field.prev(),

        ModalMessage::ToggleTarget => {
            ignore_rejection(app.manager.set_rename_target(target.toggle()));
        }

        ModalMessage::Input(c) => match app.bulk_field {
            BulkField::Find => {
                find.push(c);
                ignore_rejection(app.manager.set_rename_find(&find));
            }
            BulkField::Replace => {
                replace.push(c);
                ignore_rejection(app.manager.set_rename_replace(&replace));
            }
            BulkField::Target => {}
        },

        ModalMessage::Backspace => match app.bulk_field {
            BulkField::Find => {
                find.pop();
                ignore_rejection(app.manager.set_rename_find(&find));
            }
            BulkField::Replace => {
                replace.pop();
                ignore_rejection(app.manager.set_rename_replace(&replace));
            }
            BulkField::Target => {}
        },

        ModalMessage::Confirm => match app.runtime.block_on(app.manager.commit_bulk_rename()) {
            Err(CoreError::NoMatches) => app.set_status("Nothing to rename: no entity matches"),
            other => ignore_rejection(other),
        },
    }
}

/// Edits are refused while a commit is outstanding; the dialog already shows it
fn ignore_rejection(result: CoreResult<()>) {
    if let Err(e) = result {
        log::debug!("Dialog input ignored: {e}");
    }
}
