pub mod photos;
pub mod utils;

pub(super) fn mount(mut route: tide::Route<crate::State>) {
    photos::mount(route.at("/photos"));
}
