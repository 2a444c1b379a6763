use std::cell::{
    RefCell,
    RefMut
};
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::ladder::ladder::Ladder;
use crate::ladder::laddermanager::LadderManager;
use crate::manager::managererror::ManagerError;
use crate::manager::manager::{
    IManager,
    Manager
};


#[derive(Deserialize)]
struct ConfigurationJsonProp {
    ladder: Vec<serde_json::Value>
}

/// Named currency ladders, loaded from a JSON document of the form
/// `{ "ladder": [ { "name": ..., "decade": [...], "base": ..., "convention": ... } ] }`.
pub struct Configuration {
    ladder_manager_cell: RefCell<Manager<Arc<Ladder<Decimal>>>>
}


impl Configuration {
    pub fn new() -> Configuration {
        Configuration {
            ladder_manager_cell: RefCell::new(LadderManager::new::<Decimal>())
        }
    }

    pub fn ladder_manager(&self) -> RefMut<'_, Manager<Arc<Ladder<Decimal>>>> {
        self.ladder_manager_cell.borrow_mut()
    }

    pub fn ladder(&self, name: &str) -> Result<Arc<Ladder<Decimal>>, ManagerError> {
        self.ladder_manager().get(name)
    }

    pub fn from_json(&self, json_value: serde_json::Value) -> Result<(), ManagerError> {
        let json_prop: ConfigurationJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
        let ladder_manager = self.ladder_manager_cell.borrow_mut();
        ladder_manager.insert_obj_from_json_vec(&json_prop.ladder)?;
        tracing::debug!(ladders = json_prop.ladder.len(), "configuration loaded");
        Ok(())
    }

    pub fn from_json_str(&self, json_str: &str) -> Result<(), ManagerError> {
        let json_value: serde_json::Value = serde_json::from_str(json_str)?;
        self.from_json(json_value)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new()
    }
}
