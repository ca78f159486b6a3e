//! MyBatis statement templates for every operation declared by the
//! `mapweave` capability contracts.

mod serializer;
pub use serializer::{Flavor, Serializer};

mod operation;

mod statement;

use mapweave_core::{TableContext, Templates};

/// Returns the default templates, rendering identifiers for `flavor`.
pub fn templates(flavor: Flavor) -> Templates {
    let serializer = Serializer::new(flavor);
    let mut templates = Templates::new();

    for (operation, render) in operation::OPERATIONS {
        let render = *render;
        templates.register(*operation, move |cx: &TableContext| render(&serializer, cx));
    }

    templates
}

/// Names of the operations covered by [`templates`]
pub fn operations() -> impl Iterator<Item = &'static str> {
    operation::OPERATIONS.iter().map(|(name, _)| *name)
}
