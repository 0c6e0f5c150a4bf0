use postblur_image::ColorImage;

/// A post-processing step the frame pipeline runs once per frame.
pub trait PostProcessStage: Send {
    /// The error reported when the stage fails on a frame.
    type Error;

    /// A short name used in logs.
    fn name(&self) -> &str;

    /// Process one frame in place.
    fn process_frame(&mut self, frame: &mut ColorImage) -> Result<(), Self::Error>;
}

/// Runs a list of stages in order on each frame.
///
/// The chain stops at the first stage that fails; the frame then holds the
/// output of the stages that already ran.
pub struct StageChain<E> {
    stages: Vec<Box<dyn PostProcessStage<Error = E>>>,
}

impl<E> Default for StageChain<E> {
    fn default() -> Self {
        Self { stages: Vec::new() }
    }
}

impl<E> StageChain<E> {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage to the end of the chain.
    pub fn with_stage(mut self, stage: impl PostProcessStage<Error = E> + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// The number of stages in the chain.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the chain has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// The stage names in execution order.
    pub fn names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }
}

impl<E: 'static> PostProcessStage for StageChain<E> {
    type Error = E;

    fn name(&self) -> &str {
        "chain"
    }

    fn process_frame(&mut self, frame: &mut ColorImage) -> Result<(), Self::Error> {
        for stage in self.stages.iter_mut() {
            log::trace!("running stage {}", stage.name());
            stage.process_frame(frame)?;
        }
        Ok(())
    }
}
