//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Units](#units)
//! - [Discretization](#discretization)
//! - [Split-step evolution](#split-step-evolution)
//! - [Imaginary time](#imaginary-time)
//! - [Spin-1 condensates](#spin-1-condensates)
//!
//! # Background
//! At low temperature, a dilute gas of bosons is well described by a single
//! complex field ψ(**x**, *t*) (the order parameter, or "wavefunction" of the
//! condensate) obeying the Gross-Pitaevskii equation (GPE)
//! ```text
//!    ∂ψ      ħ²
//! iħ -- = - --- ∇²ψ + V(x) ψ + g |ψ|² ψ
//!    ∂t     2 m
//! ```
//! where *V* is an external (trapping) potential and *g* = 4π*ħ*²*a*<sub>s</sub>/*m*
//! describes contact interactions between atoms with s-wave scattering length
//! *a*<sub>s</sub>. The field is normalized to the total number of atoms,
//! ```text
//! N = ∫ |ψ(x)|² dx
//! ```
//! and *N* is conserved by real-time evolution.
//!
//! # Units
//! All evolution routines in this crate work with the GPE in harmonic-oscillator
//! units. Given a reference trap frequency *ω*, measure lengths in units of
//! *a* = √(*ħ*/*mω*), energies in units of *ħω* and times in units of 1/*ω*.
//! The GPE then becomes
//! ```text
//!   ∂ψ     1
//! i -- = - - ∇²ψ + V ψ + g |ψ|² ψ
//!   ∂t     2
//! ```
//! with dimensionless *g* = 4π *N a*<sub>s</sub> / *a* when ψ is normalized to
//! 1, or *g* = 4π *a*<sub>s</sub> / *a* when ψ is normalized to *N*.
//!
//! In lower dimensions, tight harmonic confinement with frequency
//! *ω*<sub>⊥</sub> along the frozen axes is integrated out assuming a Gaussian
//! profile, which rescales the interaction strength. With
//! *a*<sub>⊥</sub> = √(*ħ*/*mω*<sub>⊥</sub>),
//! ```text
//! g₂ = √(8π) N aₛ / a⊥          (2D)
//! g₁ = 2 N aₛ a / a⊥²           (1D)
//! ```
//! Items in [`units`][crate::units] are provided to handle the minutiae
//! associated with conversion to and from these units.
//!
//! # Discretization
//! The field is sampled on a uniform rectangular grid with *N*<sub>*d*</sub>
//! points and spacing *h*<sub>*d*</sub> along each axis, centred on the origin:
//! ```text
//! x_d[i] = (i - N_d / 2) h_d,    i ∊ {0, ..., N_d - 1}
//! ```
//! The discrete Fourier transform implicitly makes the box periodic, with
//! length *L*<sub>*d*</sub> = *N*<sub>*d*</sub> *h*<sub>*d*</sub>. Its output
//! is laid out in "FFT order": bin 0 holds the zero wavenumber, bins increase
//! through the positive wavenumbers, then wrap around to the most negative
//! wavenumber and increase back toward zero,
//! ```text
//! k_d[i] = i δk_d           for i < ⌈N_d / 2⌉
//!        = (i - N_d) δk_d   otherwise
//!
//! δk_d = 2π / L_d
//! ```
//! [`Grid`][crate::grid::Grid] stores the reciprocal-space mesh directly in
//! this order, so no shifting is ever required.
//!
//! Transforms are unnormalized in the forward direction and normalized by
//! 1/∏*N*<sub>*d*</sub> in the inverse direction. Parseval's theorem then reads
//! ```text
//! Σ |ψ[j]|² = (1 / ∏N_d) Σ |ψ̃[k]|²
//! ```
//! which allows the atom number to be computed from either buffer.
//!
//! # Split-step evolution
//! The right-hand side of the GPE splits naturally into a kinetic part *T*,
//! which is diagonal in reciprocal space, and a local part *U* (trap and
//! interaction), which is diagonal in position space. Over a short step
//! *Δt*, the symmetric (Strang) splitting
//! ```text
//!              -i T Δt/2  -i U Δt  -i T Δt/2
//! ψ(t + Δt) = e          e        e          ψ(t) + O(Δt³)
//! ```
//! is accurate to second order globally. Each factor is a pointwise phase in
//! the space where its operator is diagonal:
//! ```text
//!  -i T Δt/2                -i k² Δt/4
//! e          ψ̃(k)      = e            ψ̃(k)
//!
//!  -i U Δt                  -i (V(x) + g |ψ(x)|²) Δt
//! e          ψ(x)      = e                          ψ(x)
//! ```
//! Although *U* depends on ψ itself, |ψ|² is unchanged by the phase it
//! generates, so the local step is exact for real *Δt*. A single step thus
//! looks like this:
//! ```text
//!   ψ̃(t, k)
//!      |
//!      V
//!   -i k² Δt/4
//!  e
//!      |
//!      '--> iFFT ---.
//!                   |
//!                   V
//!           -i (V + g|ψ|²) Δt
//!          e
//!                   |
//!      .--- FFT <---'
//!      |
//!      V
//!   -i k² Δt/4
//!  e
//!      |
//!      V
//!  ψ̃(t + Δt, k)
//! ```
//! Note that the state is carried in reciprocal space between steps.
//!
//! # Imaginary time
//! Substituting *t* → −*iτ* turns the GPE into a diffusion-like equation in
//! which every eigenmode decays as exp(−*Eτ*). Lower-energy modes decay more
//! slowly, so repeatedly stepping with a negative-imaginary *Δt* and
//! restoring the atom number after each step converges to the ground state.
//! The same propagators are used unchanged: a complex *Δt* turns each phase
//! factor into a phase and a damping factor. Renormalization multiplies every
//! amplitude by √(*N*<sub>target</sub> / *N*<sub>current</sub>).
//!
//! # Spin-1 condensates
//! A spin-1 condensate is described by three fields ψ<sub>*m*</sub>,
//! *m* ∊ {+1, 0, −1}, with total density *n* = Σ|ψ<sub>*m*</sub>|² and
//! local spin vector **F** = Σ ψ<sub>*m*</sub>\* (**f**)<sub>*mm'*</sub>
//! ψ<sub>*m'*</sub>, where **f** are the spin-1 matrices. In components,
//! ```text
//! F_z = |ψ₊|² - |ψ₋|²
//! F_⊥ = F_x + i F_y = √2 (ψ₊* ψ₀ + ψ₀* ψ₋)
//! ```
//! The mean-field Hamiltonian adds a spin-dependent interaction
//! *c*<sub>2</sub> **F**·**f** to the density-dependent *c*<sub>0</sub> *n*
//! and includes linear (*p*) and quadratic (*q*) Zeeman shifts,
//! −*p m* + *q m*².
//!
//! The quadratic Zeeman shift commutes with the kinetic energy and is applied
//! alongside it in reciprocal space (half per kinetic half-step). The linear
//! shift, trap and *c*<sub>0</sub> term are scalar phases per component. The
//! spin-dependent term is a rotation of the 3-vector (ψ₊, ψ₀, ψ₋). For spin 1
//! the identity (**F**·**f**)² ψ = |**F**|² ψ holds for the very state that
//! defines **F**, so the matrix exponential collapses to
//! ```text
//!  -i c₂ Δt F·f               sin(c₂ |F| Δt)
//! e             ψ = cos(c₂ |F| Δt) ψ - i -------------- (F·f) ψ
//!                                             |F|
//! ```
//! which is norm-preserving for real *Δt*. When |**F**| vanishes, the second
//! term is dropped.
