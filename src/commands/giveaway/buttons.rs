use std::path::PathBuf;

use crate::commands::giveaway::models::CustomButton;
use crate::error::{Error, Result};
use crate::storage::JsonStore;

// Ordered list of admin-defined call-to-action buttons. Buttons are
// addressed by their position in the list, which is also the order they
// appear on the entrant keyboard.
#[derive(Debug)]
pub struct ButtonStore {
    store: JsonStore<Vec<CustomButton>>,
}

impl ButtonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ButtonStore {
            store: JsonStore::new(path),
        }
    }

    pub fn all(&self) -> Vec<CustomButton> {
        self.store.load_or_default()
    }

    pub fn add(&self, button: CustomButton) -> Result<Vec<CustomButton>> {
        let mut buttons = self.all();
        buttons.push(button);
        self.store.save(&buttons)?;

        Ok(buttons)
    }

    pub fn remove(&self, index: usize) -> Result<CustomButton> {
        let mut buttons = self.all();

        match index < buttons.len() {
            true => {
                let removed = buttons.remove(index);
                self.store.save(&buttons)?;
                Ok(removed)
            }
            false => Err(Error::Giveaway("No such button.".to_string())),
        }
    }
}
