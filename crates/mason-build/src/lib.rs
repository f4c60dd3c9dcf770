//! Build manifest and entry script synthesis for mason.
//!
//! # Pipeline
//!
//! ```text
//! declaration
//!   1. Manifest        ── FROM <base>, setup instructions, COPY main.py /entrypoint/
//!   2. Constants       ── name = <literal>, first-write order
//!   3. Path mirrors    ── path_dict = {name: container path}
//!   4. Operations      ── source extraction → dedent → frontmatter split
//!   5. Script          ── frontmatter, constants, functions, argparse bootstrap
//!   6. Save            ── <root>/<container>/{Dockerfile, main.py}
//! ```
//!
//! # Operations
//!
//! An operation is either extracted from its declaration text
//! ([`Operation::from_source`]) or described explicitly
//! ([`Operation::declare`]). Lines ending in [`FRONTMATTER_MARKER`] move to
//! module scope. The entry operation's annotated parameters become the
//! script's `--name` options ([`ArgSpec`]).

pub mod cli;
pub mod constants;
pub mod frontmatter;
pub mod helpers;
pub mod manifest;
pub mod operation;
pub mod paths;
pub mod save;
pub mod script;
pub mod source;

pub use cli::{ArgSpec, Arity, OptionSpec};
pub use constants::{ConstantRegistry, PRIVATE_PREFIX};
pub use frontmatter::FRONTMATTER_MARKER;
pub use helpers::{ENTRY_NAME, HelperEntry, HelperRegistry};
pub use manifest::{Instruction, Manifest};
pub use operation::{Annotation, Operation, Param, ScalarType};
pub use paths::{PATH_DICT_NAME, PathMirror, PathRegistry};
pub use script::ScriptAssembler;
