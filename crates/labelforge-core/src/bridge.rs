//! Reactive value bridges between the core and the UI layer.
//!
//! A bridge is a `{get, set, on}` triple wired at startup. Reading or
//! writing before wiring is a hard error, not a silent default.

use crate::error::{DesignError, DesignResult};

/// A get/set pair plus change listener over one value shared with the UI.
pub struct ValueBridge<T: Copy> {
    get: Option<Box<dyn Fn() -> T>>,
    set: Option<Box<dyn Fn(T)>>,
    listener: Option<Box<dyn Fn(T)>>,
}

impl<T: Copy> Default for ValueBridge<T> {
    fn default() -> Self {
        Self {
            get: None,
            set: None,
            listener: None,
        }
    }
}

impl<T: Copy> ValueBridge<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire the accessor pair. Until this runs, `value`/`set_value` fail.
    pub fn bind(&mut self, get: Box<dyn Fn() -> T>, set: Box<dyn Fn(T)>) {
        self.get = Some(get);
        self.set = Some(set);
    }

    /// Attach the change listener the UI wants notified on.
    pub fn set_listener(&mut self, listener: Box<dyn Fn(T)>) {
        self.listener = Some(listener);
    }

    pub fn ready(&self) -> bool {
        self.get.is_some() && self.set.is_some()
    }

    pub fn value(&self) -> DesignResult<T> {
        match &self.get {
            Some(get) => Ok(get()),
            None => Err(DesignError::UninitializedBridge),
        }
    }

    pub fn set_value(&self, value: T) -> DesignResult<()> {
        match &self.set {
            Some(set) => {
                set(value);
                Ok(())
            }
            None => Err(DesignError::UninitializedBridge),
        }
    }

    /// Push a change notification to the listener, if one is attached.
    pub fn notify(&self, value: T) {
        if let Some(listener) = &self.listener {
            listener(value);
        }
    }
}

/// The zoom slider bridge: a [`ValueBridge`] over the viewport zoom with
/// the slider's input range.
pub struct ZoomSlider {
    pub bridge: ValueBridge<f64>,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for ZoomSlider {
    fn default() -> Self {
        Self {
            bridge: ValueBridge::new(),
            min: 0.01,
            max: 5.0,
            step: 0.01,
        }
    }
}

impl ZoomSlider {
    pub fn new() -> Self {
        Self::default()
    }
}
