mod alert;
mod highlight;
mod matches;
mod news;
mod stream;

pub use alert::*;
pub use highlight::*;
pub use matches::*;
pub use news::*;
pub use stream::*;
