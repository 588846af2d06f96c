//! The view contract and default-view provisioning.

use super::dataset::{Dataset, Record};
use super::resize::Resizable;
use crate::scene::Params;

/// Renders part of a module's data into a region of the surface.
///
/// Operations are addressed by name so scenes can be described as data.
/// Unknown operations are the view's own business; the usual answer is to
/// ignore them.
pub trait View {
    /// Runs `operation` with `params`.
    fn run(&mut self, operation: &str, params: &Params);

    /// Runs `operation` with access to the owning module's data.
    ///
    /// Views that draw the dataset override this; the default ignores `data`.
    fn run_with(&mut self, operation: &str, params: &Params, data: &mut Dataset<Record>) {
        let _ = data;
        self.run(operation, params);
    }

    /// Releases everything the view drew. Called before the view is dropped
    /// by a full reload or a module teardown.
    fn clear(&mut self);

    /// Access to the view's resize state, for views that track dimensions.
    fn resizable_mut(&mut self) -> Option<&mut dyn Resizable> {
        None
    }
}

/// Builds the views of a module on demand.
///
/// Only views a scene requests are ever built; see [`super::Module::set_default_views`].
pub trait DefaultViewsProvider {
    /// Builds the view named `view_key`, or `None` if the module has no such view.
    fn create_view(&self, view_key: &str) -> Option<Box<dyn View>>;
}

impl<F> DefaultViewsProvider for F
where
    F: Fn(&str) -> Option<Box<dyn View>>,
{
    fn create_view(&self, view_key: &str) -> Option<Box<dyn View>> {
        self(view_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    impl View for Noop {
        fn run(&mut self, _operation: &str, _params: &Params) {}
        fn clear(&mut self) {}
    }

    #[test]
    fn test_view_not_resizable_by_default() {
        let mut view = Noop;
        assert!(view.resizable_mut().is_none());
    }

    #[test]
    fn test_closure_provider() {
        let provider = |key: &str| -> Option<Box<dyn View>> { (key == "noop").then(|| Box::new(Noop) as Box<dyn View>) };

        assert!(provider.create_view("noop").is_some());
        assert!(provider.create_view("chart").is_none());
    }

    struct RowCount(usize);

    impl View for RowCount {
        fn run(&mut self, _operation: &str, _params: &Params) {}
        fn run_with(&mut self, _operation: &str, _params: &Params, data: &mut Dataset<Record>) {
            self.0 = data.dataset_len();
        }
        fn clear(&mut self) {}
    }

    #[test]
    fn test_run_with_reads_dataset() {
        let mut data = Dataset::new(vec![Record::new(), Record::new()]);

        let mut view = RowCount(0);
        view.run_with("draw", &Params::new(), &mut data);
        assert_eq!(view.0, 2);

        data.set_max_length(1);
        data.force_limit(|_| 0.0);
        view.run_with("draw", &Params::new(), &mut data);
        assert_eq!(view.0, 1);
    }
}
