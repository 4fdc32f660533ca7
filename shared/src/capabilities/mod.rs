mod connectivity;
mod timer;

pub use self::connectivity::{Connectivity, ConnectivityOperation};
pub use self::timer::{Timer, TimerId, TimerOperation, TimerOutput};

pub use crux_core::render::Render;
pub use crux_http::Http;

use crate::event::Event;
use crate::App;

pub type AppHttp = Http<Event>;
pub type AppRender = Render<Event>;

#[derive(crux_core::macros::Effect)]
#[effect(app = "App")]
pub struct Capabilities {
    pub connectivity: Connectivity<Event>,
    pub timer: Timer<Event>,
    pub http: Http<Event>,
    pub render: Render<Event>,
}
