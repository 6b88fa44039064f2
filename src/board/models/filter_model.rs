//! # Filter Model
//!
//! Holds the active date-window filter and notifies observers when it
//! changes.

use crate::board::events::{FilterType, ModelEvent, UpdateType};

use super::points_model::ModelObserver;

#[derive(Default)]
pub struct FilterModel {
    filter: FilterType,
    observers: Vec<ModelObserver>,
}

impl FilterModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> FilterType {
        self.filter
    }

    pub fn add_observer(&mut self, observer: ModelObserver) {
        self.observers.push(observer);
    }

    pub fn set_filter(&mut self, update: UpdateType, filter: FilterType) {
        self.filter = filter;
        let event = ModelEvent::FilterChanged { update, filter };
        for observer in &self.observers {
            observer(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn filter_should_default_to_everything() {
        assert_eq!(FilterModel::new().filter(), FilterType::Everything);
    }

    #[test]
    fn set_filter_should_store_and_notify() {
        let mut model = FilterModel::new();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        model.add_observer(Box::new(move |event| sink.borrow_mut().push(event.clone())));

        model.set_filter(UpdateType::Major, FilterType::Past);

        assert_eq!(model.filter(), FilterType::Past);
        assert_eq!(
            events.borrow().as_slice(),
            &[ModelEvent::FilterChanged {
                update: UpdateType::Major,
                filter: FilterType::Past,
            }]
        );
    }
}
