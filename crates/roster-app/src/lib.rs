// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod dataset;
pub mod forms;
pub mod generate;
pub mod ids;
pub mod inline;
pub mod model;
pub mod pipeline;
pub mod selection;
pub mod state;
pub mod validation;

pub use dataset::*;
pub use forms::*;
pub use generate::*;
pub use ids::*;
pub use inline::*;
pub use model::*;
pub use pipeline::*;
pub use selection::*;
pub use state::*;
