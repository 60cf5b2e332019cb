pub mod entities;
pub mod labels;
pub mod report;
pub mod soap;
pub mod turn;

pub use entities::*;
pub use labels::*;
pub use report::*;
pub use soap::*;
pub use turn::*;
