pub mod chart;
pub mod components;
pub mod export;
pub mod icons;
pub mod modal_frame;
