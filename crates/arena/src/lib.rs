pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{DrawId, GameEvent};
pub use components::colour::Colour;
pub use components::drawable::{Drawable, Shape};
pub use components::layer::Layer;
pub use core::scene::{Scene, DEFAULT_SCENE_CAPACITY};
pub use core::time::FixedTimestep;
pub use input::queue::{InputEvent, InputQueue};
pub use input::state::{InputState, Key, MouseButton};
pub use systems::render::{collect_labels, labels_json, LabelInstance};

#[cfg(feature = "vectors")]
pub use systems::render::tessellate_scene;
#[cfg(feature = "vectors")]
pub use systems::vector::{VectorState, VectorVertex};
