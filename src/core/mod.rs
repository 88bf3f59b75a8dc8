pub mod arbitration;
pub mod clock;
pub mod engine;
pub mod gesture;
pub mod input_adapter;
pub mod timer;
pub mod transition;

pub use arbitration::*;
pub use clock::*;
pub use engine::*;
pub use gesture::*;
pub use input_adapter::*;
pub use timer::*;
pub use transition::*;
