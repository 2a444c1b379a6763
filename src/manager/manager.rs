use std::cell::{
    RefCell,
    RefMut
};
use std::collections::HashMap;

use super::managererror::ManagerError;

/// Parses one JSON object into its name and the managed value.
pub type FromJsonFn<V> = fn(serde_json::Value) -> Result<(String, V), ManagerError>;

pub trait IManager<V> where
    V: Clone {
    fn map(&self) -> RefMut<'_, HashMap<String, V>>;

    fn insert_obj_from_json(&self, json_value: serde_json::Value) -> Result<(), ManagerError>;

    fn get(&self, name: &str) -> Result<V, ManagerError> {
        let map = self.map();
        map.get(name)
            .cloned()
            .ok_or_else(|| ManagerError::map_elem_not_found(name))
    }

    fn contains(&self, name: &str) -> bool {
        self.map().contains_key(name)
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.map().keys().cloned().collect();
        names.sort();
        names
    }

    fn insert_obj_from_json_vec(&self, json_vec: &[serde_json::Value]) -> Result<(), ManagerError> {
        for j in json_vec.iter() {
            self.insert_obj_from_json(j.clone())?;
        }
        Ok(())
    }

    /// Accepts a single object or an array of objects.
    fn insert_from_json_str(&self, json_str: &str) -> Result<(), ManagerError> {
        let json_value: serde_json::Value = serde_json::from_str(json_str)?;
        if json_value.is_array() {
            let json_array: Vec<serde_json::Value> = ManagerError::from_json_or_json_parse_error(json_value)?;
            self.insert_obj_from_json_vec(&json_array)
        } else {
            self.insert_obj_from_json(json_value)
        }
    }
}


pub struct Manager<V> {
    map_cell: RefCell<HashMap<String, V>>,
    get_obj_from_json: FromJsonFn<V>
}


impl <V> Manager<V> where
    V: Clone {
    pub fn new(get_obj_from_json: FromJsonFn<V>) -> Manager<V> {
        Manager { map_cell: RefCell::new(HashMap::new()), get_obj_from_json }
    }
}

impl <V> IManager<V> for Manager<V> where
    V: Clone {
    fn map(&self) -> RefMut<'_, HashMap<String, V>> {
        self.map_cell.borrow_mut()
    }

    fn insert_obj_from_json(&self, json_value: serde_json::Value) -> Result<(), ManagerError> {
        let (name, v) = (self.get_obj_from_json)(json_value)?;
        if self.map().insert(name.clone(), v).is_some() {
            tracing::warn!(%name, "replacing existing entry");
        } else {
            tracing::debug!(%name, "entry inserted");
        }
        Ok(())
    }
}
