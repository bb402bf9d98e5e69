//! Single-pass predicate composition.

type Predicate<T> = Box<dyn Fn(&T) -> bool>;

/// Conjunction of record predicates, applied in one pass.
pub struct FilterPipeline<T> {
    predicates: Vec<Predicate<T>>,
}

impl<T> Default for FilterPipeline<T> {
    fn default() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }
}

impl<T> FilterPipeline<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one predicate; every predicate must hold for a record to pass.
    pub fn push(&mut self, predicate: impl Fn(&T) -> bool + 'static) {
        self.predicates.push(Box::new(predicate));
    }

    pub fn with(mut self, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        self.push(predicate);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, item: &T) -> bool {
        self.predicates.iter().all(|predicate| predicate(item))
    }

    /// Keeps matching items, preserving input order.
    pub fn apply(&self, items: Vec<T>) -> Vec<T> {
        if self.is_empty() {
            return items;
        }
        items.into_iter().filter(|item| self.matches(item)).collect()
    }
}
