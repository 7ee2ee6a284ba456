//! Tests for the Laplacian, wavevector and Helmholtz operators


use approx::assert_abs_diff_eq;
use num_complex::Complex;
use pswave::prelude::*;
use test_utils::*;

#[test]
fn test_laplacian_without_pml_is_spectral_laplacian() {
    let domain = domain(&[32, 24], 0.5);
    let medium = Medium::<FourierSeries>::homogeneous(domain.clone(), 1.0, 1.0, 0.0, 0).unwrap();
    let (u, k2) = plane_mode::<FourierSeries>(&domain, [2.0, 3.0]);

    let (laplacian, _) = laplacian_with_pml(&u, &medium, 5.0, None).unwrap();
    let expected = u.clone() * Complex::new(-k2, 0.0);

    let error = max_abs_error(laplacian.values(), expected.values());
    assert!(error < 1e-9, "max error {:.3e}", error);
}

#[test]
fn test_laplacian_converges_as_pml_vanishes() {
    let domain = domain(&[32, 32], 1.0);
    let medium = Medium::<FourierSeries>::homogeneous(domain.clone(), 1.0, 1.0, 0.0, 6).unwrap();
    let (u, k2) = plane_mode::<FourierSeries>(&domain, [1.0, 2.0]);
    let expected = u.clone() * Complex::new(-k2, 0.0);

    let mut previous = f64::INFINITY;
    for omega in [1e-1, 1e-3, 1e-6] {
        let (laplacian, _) = laplacian_with_pml(&u, &medium, omega, None).unwrap();
        let error = relative_error(laplacian.values(), expected.values());
        assert!(error < previous, "error {:.3e} at omega {}", error, omega);
        previous = error;
    }
    assert!(previous < 1e-4, "final error {:.3e}", previous);
}

#[test]
fn test_pml_damps_the_boundary() {
    let domain = domain(&[32, 32], 1.0);
    let (u, _) = plane_mode::<FourierSeries>(&domain, [1.0, 1.0]);
    let free = Medium::<FourierSeries>::homogeneous(domain.clone(), 1.0, 1.0, 0.0, 0).unwrap();
    let damped = Medium::<FourierSeries>::homogeneous(domain.clone(), 1.0, 1.0, 0.0, 8).unwrap();

    let (a, _) = laplacian_with_pml(&u, &free, 1.0, None).unwrap();
    let (b, _) = laplacian_with_pml(&u, &damped, 1.0, None).unwrap();

    // a damped layer adds an imaginary part
    let imag: f64 = b.values().iter().map(|v| v.im.abs()).sum();
    assert!(imag > 1e-3);
    assert!(relative_error(b.values(), a.values()) > 1e-3);
}

#[test]
fn test_wavevector_of_ones_is_k_squared() {
    let domain = domain(&[12, 10], 1e-3);
    let omega = 2.0 * std::f64::consts::PI * 1e6;
    let (c, alpha) = (1500.0, 0.5);
    let medium = Medium::<FourierSeries>::homogeneous(domain.clone(), c, 1000.0, alpha, 0).unwrap();
    let ones = Field::<FourierSeries>::constant(domain, Complex::new(1.0, 0.0));

    let result = wavevector(&ones, &medium, omega).unwrap();
    let alpha_np = db_to_neper(alpha, 2.0);
    let expected = Complex::new((omega / c).powi(2), 2.0 * omega.powi(3) * alpha_np / c);

    let first = result.values().iter().next().copied().unwrap();
    assert!(result.values().iter().all(|&v| v == first));
    assert_abs_diff_eq!(first.re / expected.re, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(first.im / expected.im, 1.0, epsilon = 1e-12);
}

#[test]
fn test_cached_and_uncached_helmholtz_are_identical() {
    let domain = domain(&[24, 20], 0.1);
    let speed = random_map::<FourierSeries>(&domain, 1400.0, 1600.0, 1);
    let density = random_map::<FourierSeries>(&domain, 900.0, 1100.0, 2);
    let attenuation = random_map::<FourierSeries>(&domain, 0.0, 1.0, 3);
    let medium = Medium::new(domain.clone(), speed, density, attenuation, 4).unwrap();
    let u = random_field::<FourierSeries>(&domain, 4);
    let omega = 2.0 * std::f64::consts::PI * 5e3;

    let (uncached, params) = helmholtz(&u, &medium, omega, None).unwrap();
    assert!(params.fft_rho0.is_some());

    let (cached, reused) = helmholtz(&u, &medium, omega, Some(&params)).unwrap();
    assert!(bit_identical(uncached.values(), cached.values()));
    assert!(reused.fft_u.ptr_eq(&params.fft_u));

    // a second pass through the returned bundle stays identical
    let (again, _) = helmholtz(&u, &medium, omega, Some(&reused)).unwrap();
    assert!(bit_identical(uncached.values(), again.values()));
}

#[test]
fn test_helmholtz_is_laplacian_plus_wavevector() {
    let domain = domain(&[16, 16, 8], 0.25);
    let density = random_map::<FourierSeries>(&domain, 1.0, 2.0, 11);
    let medium = Medium::new(domain.clone(), 2.0, density, 0.1, 2).unwrap();
    let u = random_field::<FourierSeries>(&domain, 12);

    let (h, params) = helmholtz(&u, &medium, 3.0, None).unwrap();
    let (l, _) = laplacian_with_pml(&u, &medium, 3.0, Some(&params)).unwrap();
    let k = wavevector(&u, &medium, 3.0).unwrap();

    assert!(bit_identical(h.values(), l.try_add(&k).unwrap().values()));
}

#[test]
fn test_helmholtz_is_linear() {
    let domain = domain(&[16, 16], 0.5);
    let speed = random_map::<FourierSeries>(&domain, 1.0, 2.0, 21);
    let medium = Medium::new(domain.clone(), speed, 1.0, 0.2, 3).unwrap();
    let a = random_field::<FourierSeries>(&domain, 22);
    let b = random_field::<FourierSeries>(&domain, 23);
    let scale = Complex::new(0.5, -1.5);

    let (ha, params) = helmholtz(&a, &medium, 2.0, None).unwrap();
    let (hb, _) = helmholtz(&b, &medium, 2.0, Some(&params)).unwrap();
    let combined = a.clone() * scale;
    let combined = combined.try_add(&b).unwrap();
    let (h_combined, _) = helmholtz(&combined, &medium, 2.0, Some(&params)).unwrap();

    let expected = (ha * scale).try_add(&hb).unwrap();
    assert!(all_close(h_combined.values(), expected.values(), 1e-10, 1e-10));
}

#[test]
fn test_params_from_other_domain_are_rebuilt() {
    let small = domain(&[16, 16], 1.0);
    let large = domain(&[32, 32], 1.0);
    let small_medium = Medium::<FourierSeries>::homogeneous(small.clone(), 1.0, 1.0, 0.0, 2).unwrap();
    let large_medium = Medium::<FourierSeries>::homogeneous(large.clone(), 1.0, 1.0, 0.0, 2).unwrap();

    let (_, small_params) =
        helmholtz(&random_field(&small, 31), &small_medium, 1.0, None).unwrap();
    // a bundle from another grid is rebuilt rather than misapplied
    let (from_stale, _) = helmholtz(
        &random_field(&large, 32),
        &large_medium,
        1.0,
        Some(&small_params),
    )
    .unwrap();
    let (fresh, _) = helmholtz(&random_field(&large, 32), &large_medium, 1.0, None).unwrap();
    assert!(bit_identical(from_stale.values(), fresh.values()));
}

#[test]
fn test_finite_differences_matches_fourier_for_smooth_fields() {
    let domain = domain(&[64, 64], 0.25);
    let (u_fourier, _) = plane_mode::<FourierSeries>(&domain, [1.0, 1.0]);
    let (u_grid, _) = plane_mode::<FiniteDifferences>(&domain, [1.0, 1.0]);
    let fourier_medium =
        Medium::<FourierSeries>::homogeneous(domain.clone(), 1.0, 1.0, 0.0, 0).unwrap();
    let grid_medium =
        Medium::<FiniteDifferences>::homogeneous(domain.clone(), 1.0, 1.0, 0.0, 0).unwrap();

    let (a, _) = helmholtz(&u_fourier, &fourier_medium, 1.0, None).unwrap();
    let (b, _) = helmholtz(&u_grid, &grid_medium, 1.0, None).unwrap();
    assert!(relative_error(b.values(), a.values()) < 5e-2);
}

#[test]
fn test_variable_density_correction_matches_analytic() {
    let domain = domain(&[64], 0.1);
    let length = domain.domain_size()[0];
    let a = 2.0 * std::f64::consts::PI / length;
    let b = 2.0 * std::f64::consts::PI * 2.0 / length;
    let x = &domain.space_axis()[0];

    let u = Field::<FourierSeries>::from_real(
        domain.clone(),
        x.mapv(|xv| (a * xv).sin()).into_dyn(),
    )
    .unwrap();
    let rho = Field::<FourierSeries>::from_real(
        domain.clone(),
        x.mapv(|xv| 2.0 + (b * xv).cos()).into_dyn(),
    )
    .unwrap();
    let medium = Medium::new(domain.clone(), 1.0, rho, 0.0, 0).unwrap();

    let (laplacian, _) = laplacian_with_pml(&u, &medium, 1.0, None).unwrap();

    // u'' - u'·ρ'/ρ
    let expected = x.mapv(|xv| {
        let du = a * (a * xv).cos();
        let d2u = -a * a * (a * xv).sin();
        let rho = 2.0 + (b * xv).cos();
        let drho = -b * (b * xv).sin();
        Complex::new(d2u - du * drho / rho, 0.0)
    });
    let error = max_abs_error(laplacian.values(), &expected.into_dyn());
    assert!(error < 1e-9, "max error {:.3e}", error);
}
