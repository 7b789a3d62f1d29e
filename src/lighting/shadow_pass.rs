//! Shadow pass controller
//!
//! Sequences the two passes of a frame: Idle -> DepthPass -> MainPass -> Idle.
//! The light-space transform is computed exactly once, on entering the depth
//! pass, and the main pass receives that stored value rather than a
//! recomputation. Calls out of order are `StateError`s.

use super::light_data::{LightConfig, LightSpaceTransform};
use super::light_operations::compute_light_space;
use crate::error::{EngineError, EngineResult};

/// Where the controller is within the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    Idle,
    DepthPass,
    MainPass,
}

/// Shadow pass controller data - no transform survives past `end_frame`
#[derive(Debug, Clone)]
pub struct ShadowPassData {
    pub phase: FramePhase,
    /// Transform for the frame in flight
    pub current: Option<LightSpaceTransform>,
    pub frames_completed: u64,
}

impl Default for ShadowPassData {
    fn default() -> Self {
        Self {
            phase: FramePhase::Idle,
            current: None,
            frames_completed: 0,
        }
    }
}

fn phase_error(expected: FramePhase, actual: FramePhase) -> EngineError {
    EngineError::StateError {
        expected: format!("{:?}", expected),
        actual: format!("{:?}", actual),
    }
}

/// Idle -> DepthPass. Computes and stores this frame's light-space transform.
pub fn begin_depth_pass(
    data: &mut ShadowPassData,
    light: &LightConfig,
) -> EngineResult<LightSpaceTransform> {
    if data.phase != FramePhase::Idle {
        return Err(phase_error(FramePhase::Idle, data.phase));
    }

    let transform = compute_light_space(light);
    data.current = Some(transform);
    data.phase = FramePhase::DepthPass;
    Ok(transform)
}

/// DepthPass -> MainPass. Returns the transform stored by `begin_depth_pass`.
pub fn begin_main_pass(data: &mut ShadowPassData) -> EngineResult<LightSpaceTransform> {
    if data.phase != FramePhase::DepthPass {
        return Err(phase_error(FramePhase::DepthPass, data.phase));
    }

    let transform = data.current.ok_or_else(|| EngineError::Internal {
        message: "depth pass entered without a light-space transform".to_string(),
    })?;
    data.phase = FramePhase::MainPass;
    Ok(transform)
}

/// MainPass -> Idle
pub fn end_frame(data: &mut ShadowPassData) -> EngineResult<()> {
    if data.phase != FramePhase::MainPass {
        return Err(phase_error(FramePhase::MainPass, data.phase));
    }

    data.current = None;
    data.phase = FramePhase::Idle;
    data.frames_completed += 1;
    Ok(())
}

/// Drop a frame that failed mid-way (e.g. surface lost) and return to Idle
pub fn abort_frame(data: &mut ShadowPassData) {
    if data.phase != FramePhase::Idle {
        log::warn!("[ShadowPass] Aborting frame in phase {:?}", data.phase);
    }
    data.current = None;
    data.phase = FramePhase::Idle;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle_returns_to_idle() {
        let mut data = ShadowPassData::default();
        let light = LightConfig::default();

        for frame in 0..3 {
            let depth = begin_depth_pass(&mut data, &light).expect("depth pass");
            assert_eq!(data.phase, FramePhase::DepthPass);
            let main = begin_main_pass(&mut data).expect("main pass");
            assert_eq!(data.phase, FramePhase::MainPass);
            assert_eq!(depth, main);
            end_frame(&mut data).expect("end frame");
            assert_eq!(data.phase, FramePhase::Idle);
            assert!(data.current.is_none());
            assert_eq!(data.frames_completed, frame + 1);
        }
    }

    #[test]
    fn test_main_pass_sees_depth_pass_transform_even_if_light_changes() {
        let mut data = ShadowPassData::default();
        let mut light = LightConfig::default();

        let depth = begin_depth_pass(&mut data, &light).expect("depth pass");
        // Mid-frame edits must not leak into the main pass
        light.position = [9.0, 9.0, 9.0];
        let main = begin_main_pass(&mut data).expect("main pass");
        assert_eq!(depth.light_space, main.light_space);
    }

    #[test]
    fn test_main_pass_without_depth_pass_is_rejected() {
        let mut data = ShadowPassData::default();
        let err = begin_main_pass(&mut data).unwrap_err();
        assert_eq!(
            err.to_string(),
            "State error: expected DepthPass, actual Idle"
        );
        assert_eq!(data.phase, FramePhase::Idle);
    }

    #[test]
    fn test_double_depth_pass_is_rejected() {
        let mut data = ShadowPassData::default();
        let light = LightConfig::default();
        begin_depth_pass(&mut data, &light).expect("depth pass");
        assert!(begin_depth_pass(&mut data, &light).is_err());
        assert_eq!(data.phase, FramePhase::DepthPass);
    }

    #[test]
    fn test_end_frame_requires_main_pass() {
        let mut data = ShadowPassData::default();
        assert!(end_frame(&mut data).is_err());
        begin_depth_pass(&mut data, &LightConfig::default()).expect("depth pass");
        assert!(end_frame(&mut data).is_err());
    }

    #[test]
    fn test_abort_resets_to_idle() {
        let mut data = ShadowPassData::default();
        begin_depth_pass(&mut data, &LightConfig::default()).expect("depth pass");
        abort_frame(&mut data);
        assert_eq!(data.phase, FramePhase::Idle);
        assert!(data.current.is_none());
        assert_eq!(data.frames_completed, 0);
        assert!(begin_depth_pass(&mut data, &LightConfig::default()).is_ok());
    }
}
