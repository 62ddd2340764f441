pub mod api;

pub fn mount(app: &mut tide::Server<crate::State>) {
    api::mount(app.at("/api"));
}
