#![cfg(windows)]

use std::sync::{mpsc, Arc, Barrier};

use kineto_host::{
    current_thread_description, current_thread_id, set_current_thread_description,
    thread::{THREAD_QUERY_LIMITED_INFORMATION, THREAD_SET_LIMITED_INFORMATION},
    OwnedThreadHandle, ThreadDescription, ThreadHandle,
};

#[test]
fn unset_description_is_empty() {
    std::thread::spawn(|| {
        assert_eq!(current_thread_description().unwrap(), "");
    })
    .join()
    .unwrap();
}

#[test]
fn empty_description_round_trips() {
    std::thread::spawn(|| {
        set_current_thread_description("cupti-worker").unwrap();
        set_current_thread_description("").unwrap();
        assert_eq!(current_thread_description().unwrap(), "");
    })
    .join()
    .unwrap();
}

#[test]
fn describe_another_thread_through_join_handle() {
    let (start_tx, start_rx) = mpsc::channel::<()>();
    let (done_tx, done_rx) = mpsc::channel();
    let worker = std::thread::spawn(move || {
        start_rx.recv().unwrap();
        done_tx.send(current_thread_description().unwrap()).unwrap();
    });

    ThreadHandle::from_join_handle(&worker)
        .set_description("trace-collector")
        .unwrap();
    assert_eq!(
        ThreadHandle::from_join_handle(&worker).description().unwrap(),
        "trace-collector"
    );

    start_tx.send(()).unwrap();
    assert_eq!(done_rx.recv().unwrap(), "trace-collector");
    worker.join().unwrap();
}

#[test]
fn describe_another_thread_by_id() {
    let (id_tx, id_rx) = mpsc::channel();
    let (start_tx, start_rx) = mpsc::channel::<()>();
    let (done_tx, done_rx) = mpsc::channel();
    let worker = std::thread::spawn(move || {
        id_tx.send(current_thread_id()).unwrap();
        start_rx.recv().unwrap();
        done_tx.send(current_thread_description().unwrap()).unwrap();
    });

    let id = id_rx.recv().unwrap();
    let handle = OwnedThreadHandle::open(
        id,
        THREAD_SET_LIMITED_INFORMATION | THREAD_QUERY_LIMITED_INFORMATION,
    )
    .unwrap();
    handle.set_description("gpu-activity-flush").unwrap();
    assert_eq!(handle.description().unwrap(), "gpu-activity-flush");
    assert_eq!(
        handle.borrow().description().unwrap(),
        "gpu-activity-flush"
    );
    drop(handle);

    start_tx.send(()).unwrap();
    assert_eq!(done_rx.recv().unwrap(), "gpu-activity-flush");
    worker.join().unwrap();
}

#[test]
fn query_only_handle_cannot_set() {
    let handle =
        OwnedThreadHandle::open(current_thread_id(), THREAD_QUERY_LIMITED_INFORMATION).unwrap();
    assert!(handle.set_description("denied").is_err());
    assert!(handle.description().is_ok());
}

#[test]
fn open_missing_thread_fails() {
    // Thread ids are multiples of 4, so this one never names a thread
    assert!(OwnedThreadHandle::open(1, THREAD_QUERY_LIMITED_INFORMATION).is_err());
}

#[test]
fn concurrent_threads_keep_their_own_description() {
    const THREADS: usize = 8;
    const ROUNDS: usize = 64;

    let barrier = Arc::new(Barrier::new(THREADS));
    let workers = (0..THREADS)
        .map(|i| {
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                barrier.wait();
                for round in 0..ROUNDS {
                    let name = format!("worker-{}-{}", i, round);
                    set_current_thread_description(&name).unwrap();
                    assert_eq!(current_thread_description().unwrap(), name.as_str());
                }
            })
        })
        .collect::<Vec<_>>();

    for worker in workers {
        worker.join().unwrap();
    }
}
