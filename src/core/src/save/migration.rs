use crate::reference::EconomyRules;
use crate::save::{CareerSave, SAVE_VERSION, SaveError};
use log::{info, warn};
use serde_json::{Map, Value, json};

/// Upgrades a save document to the current layout in one pass.
///
/// * v0 carried no `version` field, kept `cash` and the transfer
///   `inbox`/`outbox`/`log` at the top level and had no per-season stores.
/// * v1 kept an unbounded transfer `log` and no tactics, staff or career record.
pub struct SaveMigration;

impl SaveMigration {
    pub fn migrate(value: Value, rules: &EconomyRules) -> Result<CareerSave, SaveError> {
        let value = Self::upgrade(value, rules)?;

        Ok(serde_json::from_value(value)?)
    }

    pub fn upgrade(mut value: Value, rules: &EconomyRules) -> Result<Value, SaveError> {
        let version = Self::version_of(&value)?;

        if version > SAVE_VERSION as u64 {
            return Err(SaveError::UnsupportedVersion {
                found: version,
                supported: SAVE_VERSION,
            });
        }

        let document = value
            .as_object_mut()
            .ok_or_else(|| SaveError::Corrupted(String::from("document is not an object")))?;

        if !document.get("user_club_id").is_some_and(Value::is_u64) {
            return Err(SaveError::Corrupted(String::from("missing user_club_id")));
        }

        if version < SAVE_VERSION as u64 {
            info!("💾 Upgrading save from version {} to {}", version, SAVE_VERSION);
        }

        if version < 1 {
            Self::v0_to_v1(document, rules)?;
        }

        if version < 2 {
            Self::v1_to_v2(document, rules)?;
        }

        document.insert(String::from("version"), json!(SAVE_VERSION));

        Ok(value)
    }

    fn version_of(value: &Value) -> Result<u64, SaveError> {
        match value.get("version") {
            None | Some(Value::Null) => Ok(0),
            Some(version) => version
                .as_u64()
                .ok_or_else(|| SaveError::Corrupted(format!("version is not a number: {}", version))),
        }
    }

    fn v0_to_v1(document: &mut Map<String, Value>, rules: &EconomyRules) -> Result<(), SaveError> {
        if !document.contains_key("finances") {
            let cash = match document.remove("cash") {
                Some(cash) => cash
                    .as_i64()
                    .ok_or_else(|| SaveError::Corrupted(String::from("cash is not an integer")))?,
                None => {
                    warn!("💾 save has no cash balance, using starting cash");
                    rules.starting_cash
                }
            };

            document.insert(
                String::from("finances"),
                json!({ "cash": cash, "currency": rules.currency() }),
            );
        }

        if !document.contains_key("transfers") {
            let mut transfers = Map::new();

            for key in ["inbox", "outbox", "log"] {
                let offers = document.remove(key).unwrap_or_else(|| json!([]));

                if !offers.is_array() {
                    return Err(SaveError::Corrupted(format!("{} is not a list", key)));
                }

                transfers.insert(key.to_string(), offers);
            }

            let next_offer_id = Self::next_offer_id(&transfers);
            transfers.insert(String::from("next_offer_id"), json!(next_offer_id));

            document.insert(String::from("transfers"), Value::Object(transfers));
        }

        let season_year = document
            .get("season")
            .and_then(|s| s.get("id"))
            .and_then(|id| id.get("start_year"))
            .and_then(Value::as_u64);

        if !document.contains_key("start_year") {
            let year = season_year.unwrap_or(rules.start_year as u64);
            document.insert(String::from("start_year"), json!(year));
        }

        if !document.contains_key("current_year") {
            let year = season_year
                .or_else(|| document.get("start_year").and_then(Value::as_u64))
                .unwrap_or(rules.start_year as u64);
            document.insert(String::from("current_year"), json!(year));
        }

        for store in ["tables", "movements", "qualifications", "continental"] {
            if !document.get(store).is_some_and(Value::is_object) {
                document.insert(store.to_string(), json!({}));
            }
        }

        Ok(())
    }

    fn v1_to_v2(document: &mut Map<String, Value>, rules: &EconomyRules) -> Result<(), SaveError> {
        let transfers = document
            .entry("transfers")
            .or_insert_with(|| json!({}))
            .as_object_mut()
            .ok_or_else(|| SaveError::Corrupted(String::from("transfers is not an object")))?;

        if let Some(log) = transfers.remove("log") {
            let mut items = log.as_array().cloned().unwrap_or_default();
            let limit = rules.history_limit.max(1);

            if items.len() > limit {
                warn!("💾 transfer log truncated from {} to {} entries", items.len(), limit);
                items.drain(..items.len() - limit);
            }

            transfers.insert(String::from("history"), json!({ "items": items, "limit": limit }));
        }

        for (key, default) in [
            ("tactics", json!(crate::club::Tactics::default())),
            ("staff", json!(crate::club::StaffQuality::default())),
            ("career", json!(crate::career::CareerRecord::default())),
        ] {
            document.entry(key).or_insert(default);
        }

        Ok(())
    }

    fn next_offer_id(transfers: &Map<String, Value>) -> u64 {
        transfers
            .values()
            .filter_map(Value::as_array)
            .flatten()
            .filter_map(|offer| offer.get("id").and_then(Value::as_u64))
            .max()
            .map_or(1, |id| id + 1)
    }
}
