pub mod colour;
pub mod drawable;
pub mod layer;
