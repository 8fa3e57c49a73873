use projector_tensor::Tensor;
use projector_tensor_ops::{group, ungroup, AxisOps, TensorOpsError};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_tensor(rng: &mut StdRng, shape: &[usize]) -> Tensor<f64> {
    let numel = shape.iter().product::<usize>();
    let data: Vec<f64> = (0..numel).map(|_| rng.random_range(-1.0..1.0)).collect();
    Tensor::from_shape_vec(shape, data).unwrap()
}

#[test]
fn test_group_ungroup_roundtrip_all_ranges() -> Result<(), TensorOpsError> {
    let mut rng = StdRng::seed_from_u64(42);
    let shape = [2, 3, 4, 5];
    let t = random_tensor(&mut rng, &shape);

    for begin in 0..shape.len() {
        for end in begin + 1..=shape.len() {
            let g = group(&t, begin as isize, end as isize)?;

            let mut expected = shape[..begin].to_vec();
            expected.push(shape[begin..end].iter().product());
            expected.extend_from_slice(&shape[end..]);
            assert_eq!(g.shape(), expected.as_slice(), "range [{begin}, {end})");

            let u = ungroup(&g, begin as isize, &shape[begin..end])?;
            assert_eq!(u.shape(), &shape);
            assert_eq!(u.as_slice(), t.as_slice());
        }
    }
    Ok(())
}

#[test]
fn test_ungroup_group_roundtrip() -> Result<(), TensorOpsError> {
    let mut rng = StdRng::seed_from_u64(7);
    let t = random_tensor(&mut rng, &[6, 20, 3]);

    let u = t.ungroup(1, &[2, 5, 2])?;
    assert_eq!(u.shape(), &[6, 2, 5, 2, 3]);
    let g = u.group(1, 4)?;
    assert_eq!(g.shape(), t.shape());
    assert_eq!(g.as_slice(), t.as_slice());
    Ok(())
}

#[test]
fn test_concrete_scenario_values() -> Result<(), TensorOpsError> {
    let t = Tensor::from_shape_fn(&[2, 3, 4], |idx| (idx[0], idx[1], idx[2]));
    let g = group(&t, 1, 3)?;
    assert_eq!(g.shape(), &[2, 12]);
    for i in 0..2 {
        for j in 0..3 {
            for k in 0..4 {
                assert_eq!(g.get(&[i, j * 4 + k]), Some(&(i, j, k)));
            }
        }
    }

    let u = ungroup(&g, 1, &[3, 4])?;
    assert_eq!(u.shape(), &[2, 3, 4]);
    assert_eq!(u.get(&[1, 2, 3]), Some(&(1, 2, 3)));
    Ok(())
}

#[test]
fn test_zero_sized_axes() -> Result<(), TensorOpsError> {
    let t = Tensor::<f32>::zeros(&[2, 0, 3]);
    let g = group(&t, 0, 2)?;
    assert_eq!(g.shape(), &[0, 3]);
    let u = ungroup(&g, 0, &[2, 0])?;
    assert_eq!(u.shape(), &[2, 0, 3]);
    assert!(matches!(
        ungroup(&g, 0, &[1]),
        Err(TensorOpsError::ShapeMismatch { size: 0, .. })
    ));
    Ok(())
}
