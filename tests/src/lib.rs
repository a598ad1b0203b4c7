//! Delta Integration Test Framework
//!
//! Scenarios compile an instruction fixture (or inline source) and verify the
//! result with a fluent assertion builder:
//!
//! ```ignore
//! Scenario::new("blocks")
//!     .fixture("blocks_world.delta")
//!     .expect(|a| a.contexts(2).prims(8).binds("blocks", "stack-clear", "<b>", "S1.top-state.block"))
//!     .run()
//!     .unwrap();
//! ```


pub use assertion::{Assertion, AssertionBuilder, Compiled};
pub use error::{ScenarioError, ScenarioResult};
pub use scenario::{fixture_path, Scenario};

pub mod prelude {
    pub use crate::{fixture_path, Assertion, AssertionBuilder, Scenario, ScenarioError};
    pub use delta_core::{
        CandidateGrouping, DeltaConfig, ErrorKind, OperatorSymbol, UnresolvedPolicy,
    };
}
