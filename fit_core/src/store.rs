//! Profile-scoped persistence.
//!
//! Every profile's data lives under its own key derived from the profile
//! name, and a single pointer key remembers who is logged in. Records carry
//! the calendar day they were saved on; loading on a later day clears the
//! day-scoped counters.

use crate::clock::{day_label, Clock, SystemClock};
use crate::record::{PartialRecord, StoredRecord};
use crate::storage::KeyValueStore;
use crate::tracking::TrackingState;
use crate::types::UserProfile;
use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};

/// Prefix of every per-profile data key
pub const DATA_KEY_PREFIX: &str = "twinFitData_";

/// Key holding the logged-in profile
pub const ACTIVE_PROFILE_KEY: &str = "twinFitUser";

/// Lower-case the name and collapse each whitespace run into `_`
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Storage key for a profile's data
pub fn data_key(name: &str) -> String {
    format!("{}{}", DATA_KEY_PREFIX, normalize_name(name))
}

pub struct ProfileStore<S> {
    storage: S,
    clock: Box<dyn Clock>,
}

impl<S: KeyValueStore> ProfileStore<S> {
    /// Store backed by `storage`, reading local wall-clock time
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, Box::new(SystemClock))
    }

    pub fn with_clock(storage: S, clock: Box<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Load a profile's state, applying the daily rollover
    ///
    /// A missing record yields fresh defaults. A record that cannot be
    /// decoded at all is logged and treated as missing. Storage failures
    /// propagate.
    pub fn load(&self, name: &str) -> Result<TrackingState> {
        let key = data_key(name);
        let today = self.today();

        let Some(raw) = self.storage.get(&key)? else {
            tracing::info!("No record under {}, starting fresh", key);
            return Ok(TrackingState::fresh(today));
        };

        match PartialRecord::decode(&raw) {
            Ok(record) => {
                tracing::debug!("Loaded record {}", key);
                Ok(record.resolve(today))
            }
            Err(e) => {
                tracing::warn!("Ignoring unreadable record {}: {}. Using defaults.", key, e);
                Ok(TrackingState::fresh(today))
            }
        }
    }

    /// Persist a profile's state, stamped with the current day
    ///
    /// The stamp is taken when saving, not when the entries were logged.
    pub fn save(&mut self, name: &str, state: &TrackingState) -> Result<()> {
        let key = data_key(name);
        let today = self.today();
        let json = StoredRecord::new(state, today).to_json()?;
        self.storage.set(&key, &json)?;
        tracing::debug!("Saved record {} ({})", key, day_label(today));
        Ok(())
    }

    /// The logged-in profile, if any. An unreadable pointer counts as logged out.
    pub fn active_profile(&self) -> Result<Option<UserProfile>> {
        let Some(raw) = self.storage.get(ACTIVE_PROFILE_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                tracing::warn!("Ignoring unreadable active profile: {}", e);
                Ok(None)
            }
        }
    }

    pub fn set_active_profile(&mut self, profile: &UserProfile) -> Result<()> {
        let json = serde_json::to_string(profile)?;
        self.storage.set(ACTIVE_PROFILE_KEY, &json)
    }

    /// Forget who is logged in. Profile data stays.
    pub fn clear_active_profile(&mut self) -> Result<()> {
        self.storage.remove(ACTIVE_PROFILE_KEY)
    }

    /// Require a logged-in profile
    pub fn require_active_profile(&self) -> Result<UserProfile> {
        self.active_profile()?.ok_or(Error::NotLoggedIn)
    }
}
