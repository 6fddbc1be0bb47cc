use thiserror::Error;

/// Invalid input to one of the mesh builders.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("parametric grid needs at least one slice and one stack (got {slices}x{stacks})")]
    EmptyGrid { slices: u32, stacks: u32 },
    #[error("cylinder needs at least 3 radial segments (got {0})")]
    TooFewSegments(u32),
    #[error("cylinder height must be positive and radii non-negative")]
    InvalidDimensions,
}

/// Invalid scene or flower configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    #[error("rose needs at least one petal layer")]
    EmptyLayers,
    #[error("layer {layer} has no petals")]
    EmptyLayer { layer: usize },
    #[error("layer {layer} has a non-positive or non-finite scale")]
    InvalidScale { layer: usize },
    #[error("layer {layer} has a non-finite height")]
    InvalidHeight { layer: usize },
    #[error("{name} must be within [{min}, {max}] (got {value})")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        assert!(SceneError::EmptyLayer { layer: 3 }
            .to_string()
            .contains("layer 3"));
        let wrapped: SceneError = GeometryError::TooFewSegments(2).into();
        assert!(wrapped.to_string().contains("got 2"));
    }
}
