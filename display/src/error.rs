use thiserror::Error;

/// Anything that can go wrong setting up or driving SDL2
#[derive(Debug, Error)]
pub enum HostError {
    #[error("SDL2: {0}")]
    Sdl(String),
    #[error("couldn't build the window: {0}")]
    Window(#[from] sdl2::video::WindowBuildError),
    #[error("couldn't build the canvas: {0}")]
    Canvas(#[from] sdl2::IntegerOrSdlError),
    #[error("couldn't create the texture: {0}")]
    Texture(#[from] sdl2::render::TextureValueError),
}

impl From<String> for HostError {
    fn from(message: String) -> Self {
        HostError::Sdl(message)
    }
}
