mod loader;
mod model;
