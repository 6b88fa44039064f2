//! # Point Edit Form View
//!
//! Inline multi-line form for editing an existing point or drafting a
//! new one. Field navigation with Tab/arrows, value cycling with
//! Left/Right, digit entry for the price, Space to toggle offers.

use chrono::{Duration, Utc};
use crossterm::event::{KeyCode, KeyEvent};

use crate::board::events::ViewAction;
use crate::board::models::{Destination, Offer, OfferGroup, Point};
use crate::board::utils::full_date_time;

use super::{NodeId, View};

/// Form fields in navigation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Type,
    Destination,
    DateFrom,
    DateTo,
    Price,
    Offers,
}

impl FormField {
    const ORDER: [FormField; 6] = [
        FormField::Type,
        FormField::Destination,
        FormField::DateFrom,
        FormField::DateTo,
        FormField::Price,
        FormField::Offers,
    ];

    fn next(self) -> FormField {
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(index + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> FormField {
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(index + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug)]
pub struct PointEditView {
    draft: Point,
    destinations: Vec<Destination>,
    offer_groups: Vec<OfferGroup>,
    field: FormField,
    offer_cursor: usize,
    is_new: bool,
    disabled: bool,
    saving: bool,
    deleting: bool,
    error: bool,
    node: Option<NodeId>,
}

impl PointEditView {
    /// Form pre-filled from an existing point
    pub fn edit(point: &Point, destinations: Vec<Destination>, offer_groups: Vec<OfferGroup>) -> Self {
        Self {
            draft: point.clone(),
            destinations,
            offer_groups,
            field: FormField::Type,
            offer_cursor: 0,
            is_new: false,
            disabled: false,
            saving: false,
            deleting: false,
            error: false,
            node: None,
        }
    }

    /// Blank form for the new-point flow
    pub fn blank(destinations: Vec<Destination>, offer_groups: Vec<OfferGroup>) -> Self {
        Self {
            draft: Point::draft(),
            destinations,
            offer_groups,
            field: FormField::Type,
            offer_cursor: 0,
            is_new: true,
            disabled: false,
            saving: false,
            deleting: false,
            error: false,
            node: None,
        }
    }

    pub fn draft(&self) -> &Point {
        &self.draft
    }

    /// Discard edits and restore the form from `point`
    pub fn reset(&mut self, point: &Point) {
        self.draft = point.clone();
        self.field = FormField::Type;
        self.offer_cursor = 0;
        self.disabled = false;
        self.saving = false;
        self.deleting = false;
        self.error = false;
    }

    pub fn set_saving(&mut self) {
        self.disabled = true;
        self.saving = true;
        self.deleting = false;
        self.error = false;
    }

    pub fn set_deleting(&mut self) {
        self.disabled = true;
        self.deleting = true;
        self.saving = false;
        self.error = false;
    }

    /// Re-enable the form after a rejected mutation
    pub fn set_aborting(&mut self) {
        self.disabled = false;
        self.saving = false;
        self.deleting = false;
        self.error = true;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn has_error(&self) -> bool {
        self.error
    }

    /// Offers available for the draft's current type
    fn available_offers(&self) -> &[Offer] {
        self.offer_groups
            .iter()
            .find(|group| group.point_type == self.draft.point_type)
            .map(|group| group.offers.as_slice())
            .unwrap_or(&[])
    }

    fn destination_index(&self) -> Option<usize> {
        let id = self.draft.destination.as_deref()?;
        self.destinations.iter().position(|d| d.id == id)
    }

    fn destination_name(&self) -> Option<&str> {
        let index = self.destination_index()?;
        Some(self.destinations[index].name.as_str())
    }

    fn cycle_destination(&mut self, forward: bool) {
        if self.destinations.is_empty() {
            return;
        }
        let len = self.destinations.len();
        let next = match self.destination_index() {
            Some(index) if forward => (index + 1) % len,
            Some(index) => (index + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        self.draft.destination = Some(self.destinations[next].id.clone());
    }

    fn cycle_type(&mut self, forward: bool) {
        self.draft.point_type = if forward {
            self.draft.point_type.next()
        } else {
            self.draft.point_type.prev()
        };
        // offers belong to a type; a type change invalidates the selection
        self.draft.offers.clear();
        self.offer_cursor = 0;
    }

    fn shift_date(&mut self, field: FormField, hours: i64) {
        let fallback = match field {
            FormField::DateFrom => self.draft.date_to,
            _ => self.draft.date_from,
        };
        let slot = match field {
            FormField::DateFrom => &mut self.draft.date_from,
            _ => &mut self.draft.date_to,
        };
        *slot = Some(match *slot {
            Some(date) => date + Duration::hours(hours),
            None => fallback.unwrap_or_else(Utc::now),
        });
    }

    fn toggle_offer(&mut self) {
        let offers = self.available_offers();
        if offers.is_empty() {
            return;
        }
        let id = offers[self.offer_cursor.min(offers.len() - 1)].id.clone();
        if let Some(index) = self.draft.offers.iter().position(|o| *o == id) {
            self.draft.offers.remove(index);
        } else {
            self.draft.offers.push(id);
        }
    }

    fn move_offer_cursor(&mut self, forward: bool) {
        let count = self.available_offers().len();
        if count == 0 {
            return;
        }
        self.offer_cursor = if forward {
            (self.offer_cursor + 1) % count
        } else {
            (self.offer_cursor + count - 1) % count
        };
    }

    /// Translate a key into a form intent, mutating the draft for
    /// value edits. A disabled form ignores all input.
    pub fn on_key(&mut self, key: KeyEvent) -> Option<ViewAction> {
        if self.disabled {
            return None;
        }

        match key.code {
            KeyCode::Esc => return Some(ViewAction::CloseEditor),
            KeyCode::Enter => return Some(ViewAction::Submit(self.draft.clone())),
            KeyCode::Delete => {
                return if self.is_new {
                    Some(ViewAction::CloseEditor)
                } else {
                    Some(ViewAction::Delete(self.draft.clone()))
                };
            }
            KeyCode::Tab | KeyCode::Down => {
                self.field = self.field.next();
                return Some(ViewAction::FieldEdited);
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.field = self.field.prev();
                return Some(ViewAction::FieldEdited);
            }
            _ => {}
        }

        let forward = match key.code {
            KeyCode::Right => Some(true),
            KeyCode::Left => Some(false),
            _ => None,
        };

        match (self.field, key.code) {
            (FormField::Type, KeyCode::Left | KeyCode::Right) => {
                self.cycle_type(forward.unwrap_or(true));
                Some(ViewAction::FieldEdited)
            }
            (FormField::Destination, KeyCode::Left | KeyCode::Right) => {
                self.cycle_destination(forward.unwrap_or(true));
                Some(ViewAction::FieldEdited)
            }
            (FormField::DateFrom, KeyCode::Left | KeyCode::Right) => {
                self.shift_date(FormField::DateFrom, if forward.unwrap_or(true) { 1 } else { -1 });
                Some(ViewAction::FieldEdited)
            }
            (FormField::DateTo, KeyCode::Left | KeyCode::Right) => {
                self.shift_date(FormField::DateTo, if forward.unwrap_or(true) { 1 } else { -1 });
                Some(ViewAction::FieldEdited)
            }
            (FormField::Price, KeyCode::Char(c)) if c.is_ascii_digit() => {
                let digit = c.to_digit(10).unwrap_or(0);
                self.draft.base_price = self.draft.base_price.saturating_mul(10).saturating_add(digit);
                Some(ViewAction::FieldEdited)
            }
            (FormField::Price, KeyCode::Backspace) => {
                self.draft.base_price /= 10;
                Some(ViewAction::FieldEdited)
            }
            (FormField::Offers, KeyCode::Left | KeyCode::Right) => {
                self.move_offer_cursor(forward.unwrap_or(true));
                Some(ViewAction::FieldEdited)
            }
            (FormField::Offers, KeyCode::Char(' ')) => {
                self.toggle_offer();
                Some(ViewAction::FieldEdited)
            }
            _ => None,
        }
    }

    fn field_mark(&self, field: FormField) -> &'static str {
        if self.field == field {
            ">"
        } else {
            " "
        }
    }

    fn date_label(date: Option<chrono::DateTime<Utc>>) -> String {
        date.map(full_date_time).unwrap_or_else(|| "(not set)".to_string())
    }

    fn offers_line(&self) -> String {
        let offers = self.available_offers();
        if offers.is_empty() {
            return "(none for this type)".to_string();
        }
        offers
            .iter()
            .enumerate()
            .map(|(index, offer)| {
                let checked = if self.draft.offers.contains(&offer.id) {
                    "x"
                } else {
                    " "
                };
                let cursor = if self.field == FormField::Offers && index == self.offer_cursor {
                    ">"
                } else {
                    " "
                };
                format!("{}[{}] {} +{}", cursor, checked, offer.title, offer.price)
            })
            .collect::<Vec<_>>()
            .join("  ")
    }

    fn status_line(&self) -> String {
        if self.saving {
            "Saving...".to_string()
        } else if self.deleting {
            "Deleting...".to_string()
        } else if self.error {
            "Failed - check the connection and retry".to_string()
        } else if self.is_new {
            "Enter: save   Esc: cancel".to_string()
        } else {
            "Enter: save   Esc: cancel   Del: delete".to_string()
        }
    }
}

impl View for PointEditView {
    fn template(&self) -> String {
        let title = if self.is_new { "New point" } else { "Edit point" };
        let mut lines = vec![format!("+-- {} {}", title, "-".repeat(46 - title.len()))];

        lines.push(format!(
            "|{} Type:        < {} >",
            self.field_mark(FormField::Type),
            self.draft.point_type.label()
        ));
        lines.push(format!(
            "|{} Destination: < {} >",
            self.field_mark(FormField::Destination),
            self.destination_name().unwrap_or("(not set)")
        ));
        lines.push(format!(
            "|{} From:        {}",
            self.field_mark(FormField::DateFrom),
            Self::date_label(self.draft.date_from)
        ));
        lines.push(format!(
            "|{} To:          {}",
            self.field_mark(FormField::DateTo),
            Self::date_label(self.draft.date_to)
        ));
        lines.push(format!(
            "|{} Price:       {}",
            self.field_mark(FormField::Price),
            self.draft.base_price
        ));
        lines.push(format!(
            "|{} Offers:      {}",
            self.field_mark(FormField::Offers),
            self.offers_line()
        ));
        lines.push(format!("| {}", self.status_line()));
        lines.push(format!("+{}", "-".repeat(50)));
        lines.join("\n")
    }

    fn node(&self) -> Option<NodeId> {
        self.node
    }

    fn set_node(&mut self, node: Option<NodeId>) {
        self.node = node;
    }
}
