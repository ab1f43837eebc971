pub mod machine;
pub mod memory;
pub mod program;

pub mod amplifier;
pub mod arcade;
pub mod droid;
pub mod network;
pub mod painter;
pub mod scaffold;
pub mod spring;
