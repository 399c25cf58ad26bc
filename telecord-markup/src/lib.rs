//! Discord markdown and Telegram entity conversion
//!
//!     This crate converts chat formatting between Discord and Telegram. Discord carries its
//!     formatting inline as markdown-like syntax; Telegram carries plain text plus a list of
//!     entity spans measured in UTF-16 units. Neither side maps onto the other directly, so
//!     the two directions take different routes.
//!
//!     This is a pure lib: it never talks to either chat platform, prints nothing and reads
//!     no env vars or files. Name lookups and file URLs come in through the traits in
//!     ./resolve.rs.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── resolve.rs              # Name and file URL collaborators
//!     ├── formats
//!     │   ├── discord             # Rule table and parser (the only inbound format)
//!     │   ├── html                # Tree → HTML through html5ever
//!     │   ├── telegram            # Tree → Telegram Bot API HTML
//!     │   ├── treeviz, json       # Tree dumps for inspection
//!     │   └── icons.rs
//!     ├── ir                      # Formatting tree and its Visitor
//!     ├── entities                # Telegram message and entity model
//!     ├── spans                   # Entity spans → Discord markdown
//!     ├── slicer.rs               # Length-bounded slicing, reply quotes
//!     ├── convert                 # Message-level converters
//!     ├── transforms.rs           # Tree transforms and one-call helpers
//!     └── common                  # Escaping and UTF-16 helpers
//!
//! Testing
//!     tests
//!     └── <area>
//!         └── <testname>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Discord → Telegram
//!
//!     Discord text is parsed into a formatting tree (./ir/nodes.rs) by a table of grammar
//!     rules. Rules are grouped in tiers; within the first tier that matches at a position
//!     the match with the best quality score wins. Renderers walk the tree with the
//!     Visitor in ./ir/visit.rs, so adding an output format never touches the parser.
//!
//! Telegram → Discord
//!
//!     Entity spans are rendered straight to Discord markdown in one pass (./spans). Openers
//!     are deferred until text lands inside them, and spaces at a span's edge are moved
//!     outside its delimiters, because Discord will not read `** bold**` as bold. The
//!     slicer (./slicer.rs) then cuts long messages so that each rendered part fits
//!     Discord's length cap, delimiters and escapes included.
//!
//! Formats
//!
//!     Format specific capabilities are implemented with the Format trait. See the trait def [./format.rs ]
//!     - Format trait: Uniform interface for all formats (parsing and/or serialization)
//!     - FormatRegistry: Centralized discovery and selection of formats
//!     - Format implementations: discord (parse), html, telegram, treeviz and json (serialize)
//!
//! Library Choices
//!
//!     HTML output goes through html5ever's serializer rather than string concatenation, so
//!     escaping is html5ever's. Link targets are normalized with the url crate, and the
//!     grammar rules are plain regex matches anchored at the cursor.
//!
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;
pub mod resolve;
pub mod transforms;

pub mod common;
pub mod convert;
pub mod entities;
pub mod ir;
pub mod slicer;
pub mod spans;

pub use convert::{
    Converted, ConverterOptions, DiscordReader, Embed, TelegramConverter, TelegramMessage,
};
pub use entities::{EntityKind, Message, MessageEntity};
pub use error::{FormatError, ParseError, RenderError};
pub use format::Format;
pub use formats::discord::DiscordParser;
pub use ir::nodes::Node;
pub use registry::FormatRegistry;
pub use resolve::{BaseUrlFiles, FileUrlGenerator, LiteralNames, NameResolver, NameTable};
