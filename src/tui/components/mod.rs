//! # TUI Components
//!
//! Two kinds of component live here.
//!
//! ### Stateless (props only)
//!
//! - `Header`: title, status text, theme toggle, profile button
//! - `MessageView`: one chat bubble
//! - `Welcome`: empty-conversation greeting
//! - `ErrorBannerView`: failure notice above the input
//! - `MicButton`: voice capture indicator
//! - `ProfileDropdown` / `HelpSubmenu`: menu overlays
//!
//! ### Stateful (event-driven)
//!
//! - `InputBox`: the draft, emits `InputEvent::Submit`
//! - `MessageList`: scrollable conversation with a height cache
//!
//! Components get their data as struct fields rather than reaching into
//! `App`, so each one can be rendered against a `TestBackend` on its own.
//!
//! ```text
//! components/
//! ├── header.rs
//! ├── message.rs
//! ├── message_list.rs
//! ├── input_box.rs
//! ├── mic.rs
//! ├── error_banner.rs
//! ├── dropdown.rs
//! └── welcome.rs
//! ```

pub mod dropdown;
pub mod error_banner;
pub mod header;
pub mod input_box;
pub mod message;
pub mod message_list;
pub mod mic;
pub mod welcome;

pub use dropdown::{HelpSubmenu, ProfileDropdown};
pub use error_banner::ErrorBannerView;
pub use header::Header;
pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use mic::{MicButton, MicState};
pub use welcome::Welcome;
