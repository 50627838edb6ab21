/// Lifecycle extension points reserved for future runtime versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPoint {
    /// After an output element is materialized.
    ElementCreated,
    /// After an attribute is applied to an element.
    AttributeApplied,
    /// After a render fully completes.
    RenderComplete,
}

pub type HookFn = Box<dyn Fn() + Send + Sync>;

/// Append-only registration surface for lifecycle callbacks.
///
/// The registration surface exists for forward compatibility; the current
/// runtime never invokes any hook. No call sites are hidden behind it.
#[derive(Default)]
pub struct Hooks {
    element_created: Vec<HookFn>,
    attribute_applied: Vec<HookFn>,
    render_complete: Vec<HookFn>,
}

impl Hooks {
    /// Append a callback to the given hook point.
    pub fn on<F>(&mut self, point: HookPoint, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.list_mut(point).push(Box::new(callback));
    }

    /// Number of callbacks registered for a hook point.
    pub fn registered(&self, point: HookPoint) -> usize {
        self.list(point).len()
    }

    fn list(&self, point: HookPoint) -> &Vec<HookFn> {
        match point {
            HookPoint::ElementCreated => &self.element_created,
            HookPoint::AttributeApplied => &self.attribute_applied,
            HookPoint::RenderComplete => &self.render_complete,
        }
    }

    fn list_mut(&mut self, point: HookPoint) -> &mut Vec<HookFn> {
        match point {
            HookPoint::ElementCreated => &mut self.element_created,
            HookPoint::AttributeApplied => &mut self.attribute_applied,
            HookPoint::RenderComplete => &mut self.render_complete,
        }
    }
}
