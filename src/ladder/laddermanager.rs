use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::ladder::ladder::Ladder;
use crate::ladder::laddervalue::LadderValue;
use crate::ladder::tiebreaker::TieBreakConvention;
use crate::manager::manager::Manager;
use crate::manager::managererror::ManagerError;

#[derive(Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
struct LadderJsonProp<T> {
    name: String,
    decade: Vec<T>,
    base: Option<T>,
    #[serde(default)]
    convention: TieBreakConvention
}


fn get_ladder_from_json<T>(json_value: serde_json::Value) -> Result<(String, Arc<Ladder<T>>), ManagerError>
    where T: LadderValue + DeserializeOwned {
    let json_prop: LadderJsonProp<T> = ManagerError::from_json_or_json_parse_error(json_value)?;
    let base = json_prop.base.unwrap_or_else(T::ten);
    match Ladder::new(json_prop.decade, base, json_prop.convention) {
        Ok(ladder) => Ok((json_prop.name, Arc::new(ladder))),
        Err(source) => {
            tracing::warn!(name = %json_prop.name, %source, "rejected ladder configuration");
            Err(ManagerError::LadderError { name: json_prop.name, source })
        }
    }
}


pub struct LadderManager;


impl LadderManager {
    pub fn new<T>() -> Manager<Arc<Ladder<T>>>
        where T: LadderValue + DeserializeOwned {
        Manager::new(get_ladder_from_json::<T>)
    }
}
