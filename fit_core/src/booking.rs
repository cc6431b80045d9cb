//! Trainer booking board: bookable slots, the services on offer, and the
//! client's next confirmed booking. Held in memory for the session only.

use crate::catalog::{default_services, default_slots};
use crate::forms::{parse_amount, parse_int};
use crate::tracking::replace_by_id;
use crate::types::{BookingSlot, TrainerService};
use crate::{Error, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct BookingBoard {
    slots: Vec<BookingSlot>,
    services: Vec<TrainerService>,
    next_booking: Option<BookingSlot>,
}

impl Default for BookingBoard {
    fn default() -> Self {
        Self {
            slots: default_slots(),
            services: default_services(),
            next_booking: None,
        }
    }
}

impl BookingBoard {
    pub fn slots(&self) -> &[BookingSlot] {
        &self.slots
    }

    pub fn services(&self) -> &[TrainerService] {
        &self.services
    }

    pub fn next_booking(&self) -> Option<&BookingSlot> {
        self.next_booking.as_ref()
    }

    /// Client books an open slot
    pub fn book(&mut self, slot_id: &str) -> Result<&BookingSlot> {
        let slot = self
            .slots
            .iter()
            .find(|slot| slot.id == slot_id)
            .ok_or_else(|| Error::InvalidInput(format!("no slot with id {}", slot_id)))?;

        if !slot.available {
            return Err(Error::InvalidInput(format!("slot {} is not available", slot.time)));
        }

        tracing::info!("Booked session at {}", slot.time);
        Ok(self.next_booking.insert(slot.clone()))
    }

    /// Trainer edit of a slot's price and reservation. Blank fields clear them;
    /// an unparsable price clears it as well.
    pub fn edit_slot(&mut self, slot_id: &str, price: &str, client: &str) -> bool {
        let Some(existing) = self.slots.iter().find(|slot| slot.id == slot_id) else {
            return false;
        };
        let client = client.trim();
        let updated = BookingSlot {
            custom_price: parse_amount(price),
            reserved_for: (!client.is_empty()).then(|| client.to_string()),
            ..existing.clone()
        };
        replace_by_id(&mut self.slots, updated)
    }

    /// Trainer edit of a service. Fields that fail to parse keep their old value.
    pub fn edit_service(&mut self, service_id: &str, price: &str, duration: &str) -> bool {
        let Some(existing) = self.services.iter().find(|s| s.id == service_id) else {
            return false;
        };
        let updated = TrainerService {
            price: parse_amount(price)
                .filter(|p| *p != 0.0)
                .unwrap_or(existing.price),
            duration: parse_int(duration)
                .filter(|d| *d != 0)
                .unwrap_or(existing.duration),
            ..existing.clone()
        };
        replace_by_id(&mut self.services, updated)
    }
}
