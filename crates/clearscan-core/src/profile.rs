//! Pipeline configuration profiles.
//!
//! The filter chain went through several generations with different stage
//! orderings, kernel weights, and gamma parameterizations. Each generation
//! is preserved here as a named profile rather than collapsed into a single
//! canonical order; within one profile the order is fixed.

/// One named, independently toggled image transform slot in a stage plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Median,
    LocalBlur,
    GaussianBlur,
    Bilateral,
    GammaPrimary,
    NonLocalMeans1,
    Unsharp,
    NonLocalMeans2,
    GammaSecondary,
    Laplacian,
}

/// 3x3 kernel variant for the iterated local blur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlurKernel {
    /// Center 12/16, orthogonal neighbors 1/16, corners zero.
    WeightedCross,
    /// Center and orthogonal neighbors 1/5 each, corners zero.
    PlainCross,
}

/// 3x3 kernel variant for unsharp masking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsharpKernel {
    /// Center `1 + 8k/9`, all eight neighbors `-k/9`.
    Uniform,
    /// Center `1 + 12k/16`, orthogonals `-2k/16`, diagonals `-k/16`.
    CrossWeighted,
}

/// Which gamma parameterization a profile uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GammaForm {
    /// Signed integer `GammaVol`; magnitude must exceed 10 to activate.
    IntegerVol,
    /// Positive real `Gamma`/`Gamma2` applied as `x^(1/gamma)`; 0 disables.
    Real,
}

/// Named pipeline generation. `Classic` is the canonical default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineProfile {
    /// Earliest chain: blur, denoise, edge subtraction, unsharp. No gamma.
    Minimal,
    /// The long-lived shipping order with the full denoiser set and
    /// integer-parameterized gamma at the end.
    #[default]
    Classic,
    /// Gamma-before-denoise generation with a second non-local-means pass.
    Revised,
    /// Blend-capable generation: the tail runs twice with swapped gamma
    /// roles and the two variants are alpha-blended.
    DualPath,
}

/// Execution plan for one profile: the stage order, where the dual-path
/// fork sits, and the kernel/gamma variants that generation used.
#[derive(Debug, Clone, Copy)]
pub struct StagePlan {
    pub stages: &'static [Stage],
    /// Index where the secondary path would fork off. Equal to
    /// `stages.len()` for profiles that never blend.
    pub fork_index: usize,
    pub blur_kernel: BlurKernel,
    pub unsharp_kernel: UnsharpKernel,
    pub gamma_form: GammaForm,
    pub blend_capable: bool,
}

const MINIMAL_STAGES: &[Stage] = &[
    Stage::LocalBlur,
    Stage::NonLocalMeans1,
    Stage::Laplacian,
    Stage::Unsharp,
];

const CLASSIC_STAGES: &[Stage] = &[
    Stage::LocalBlur,
    Stage::Median,
    Stage::Bilateral,
    Stage::NonLocalMeans1,
    Stage::Laplacian,
    Stage::Unsharp,
    Stage::GammaPrimary,
];

const REVISED_STAGES: &[Stage] = &[
    Stage::Median,
    Stage::LocalBlur,
    Stage::GaussianBlur,
    Stage::GammaPrimary,
    Stage::NonLocalMeans1,
    Stage::Unsharp,
    Stage::NonLocalMeans2,
    Stage::Laplacian,
];

const DUAL_PATH_STAGES: &[Stage] = &[
    Stage::Median,
    Stage::LocalBlur,
    Stage::GaussianBlur,
    Stage::GammaPrimary,
    Stage::NonLocalMeans1,
    Stage::Unsharp,
    Stage::NonLocalMeans2,
    Stage::GammaSecondary,
    Stage::Laplacian,
];

impl PipelineProfile {
    pub fn plan(self) -> StagePlan {
        match self {
            PipelineProfile::Minimal => StagePlan {
                stages: MINIMAL_STAGES,
                fork_index: MINIMAL_STAGES.len(),
                blur_kernel: BlurKernel::PlainCross,
                unsharp_kernel: UnsharpKernel::Uniform,
                gamma_form: GammaForm::IntegerVol,
                blend_capable: false,
            },
            PipelineProfile::Classic => StagePlan {
                stages: CLASSIC_STAGES,
                fork_index: CLASSIC_STAGES.len(),
                blur_kernel: BlurKernel::WeightedCross,
                unsharp_kernel: UnsharpKernel::Uniform,
                gamma_form: GammaForm::IntegerVol,
                blend_capable: false,
            },
            PipelineProfile::Revised => StagePlan {
                stages: REVISED_STAGES,
                fork_index: REVISED_STAGES.len(),
                blur_kernel: BlurKernel::WeightedCross,
                unsharp_kernel: UnsharpKernel::CrossWeighted,
                gamma_form: GammaForm::IntegerVol,
                blend_capable: false,
            },
            PipelineProfile::DualPath => StagePlan {
                // Fork sits after the shared median/blur/gaussian head,
                // before any gamma is applied.
                stages: DUAL_PATH_STAGES,
                fork_index: 3,
                blur_kernel: BlurKernel::WeightedCross,
                unsharp_kernel: UnsharpKernel::CrossWeighted,
                gamma_form: GammaForm::Real,
                blend_capable: true,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PipelineProfile::Minimal => "minimal",
            PipelineProfile::Classic => "classic",
            PipelineProfile::Revised => "revised",
            PipelineProfile::DualPath => "dual-path",
        }
    }
}
