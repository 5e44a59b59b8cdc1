//! Router contract consumed by the guard.

/// Redirect primitive provided by the router.
///
/// Fire-and-forget: the guard does not wait for navigation to finish.
pub trait Navigator {
    fn redirect(&self, target: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str),
{
    fn redirect(&self, target: &str) {
        self(target)
    }
}
