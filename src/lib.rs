pub mod color;
pub mod config;
pub mod host;
pub mod icons;
pub mod layout;
pub mod loading_state;
pub mod progress;
pub mod shell;
pub mod tree;
pub mod work;


pub use color::{Color, ColorError};
pub use config::{Alignment, ButtonConfig, ButtonEntry, EdgeInsets, FontDescriptor, GalleryConfig, Shadow, load_config, load_config_from, parse_config};
pub use host::Host;
pub use icons::{IconRef, IconStyle};
pub use layout::{content_for, layout};
pub use loading_state::{LoadingState, LoadingStates};
pub use progress::indicator;
pub use shell::{Action, FlexButton, RenderedButton, render};
pub use tree::{Axis, ButtonShape, Fill, Length, Node, VisualTree};
pub use work::{Work, WorkOutcome, run_work};
