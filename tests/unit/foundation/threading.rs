use super::*;

fn fill_rows(exec: &RowExecutor) -> Vec<u8> {
    let mut out = vec![0u8; 4 * 5];
    exec.for_each_row(&mut out, 4, |y, row| {
        for (i, b) in row.iter_mut().enumerate() {
            *b = (y as u8) * 10 + i as u8;
        }
    });
    out
}

#[test]
fn sequential_visits_every_row() {
    let out = fill_rows(&RowExecutor::Sequential);
    assert_eq!(&out[..4], &[0, 1, 2, 3]);
    assert_eq!(&out[16..], &[40, 41, 42, 43]);
}

#[test]
fn parallel_matches_sequential() {
    let pool = RowExecutor::new(&Threading {
        parallel: true,
        threads: Some(2),
    })
    .unwrap();
    assert_eq!(fill_rows(&pool), fill_rows(&RowExecutor::Sequential));
}

#[test]
fn zero_threads_is_rejected() {
    let err = RowExecutor::new(&Threading {
        parallel: true,
        threads: Some(0),
    });
    assert!(matches!(err, Err(KeycompError::Validation(_))));
}

#[test]
fn empty_rows_are_a_noop() {
    let mut out: Vec<u8> = Vec::new();
    RowExecutor::Sequential.for_each_row(&mut out, 0, |_, _| panic!("no rows expected"));
}
