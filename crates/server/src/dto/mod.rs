mod route;
mod stop;

pub use route::*;
pub use stop::*;
