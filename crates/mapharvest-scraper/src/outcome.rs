//! Result type for best-effort extraction steps.

/// The result of one best-effort lookup against the rendered page.
///
/// `NotFound` means the page answered and the thing is absent;
/// `TransientFailure` means the page could not be asked. Callers collapse
/// both into a field default.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Found(T),
    NotFound,
    TransientFailure(String),
}

impl<T> Outcome<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Outcome::Found(value) => Some(value),
            Outcome::NotFound | Outcome::TransientFailure(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Found(value) => Outcome::Found(f(value)),
            Outcome::NotFound => Outcome::NotFound,
            Outcome::TransientFailure(reason) => Outcome::TransientFailure(reason),
        }
    }

    /// Chains a parse step; a parse that yields `None` becomes `NotFound`.
    pub fn and_then_parse<U>(self, f: impl FnOnce(T) -> Option<U>) -> Outcome<U> {
        match self {
            Outcome::Found(value) => f(value).map_or(Outcome::NotFound, Outcome::Found),
            Outcome::NotFound => Outcome::NotFound,
            Outcome::TransientFailure(reason) => Outcome::TransientFailure(reason),
        }
    }
}

impl<T: Default> Outcome<T> {
    pub fn unwrap_or_default(self) -> T {
        self.found().unwrap_or_default()
    }
}
