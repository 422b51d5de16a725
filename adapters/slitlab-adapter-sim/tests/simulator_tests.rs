//! Integration tests for the simulator backend.

use slitlab_adapter_sim::SimulatorBackend;
use slitlab_hal::{Backend, HalError};
use slitlab_ir::{Circuit, ClbitId, QubitId};

fn interference() -> Circuit {
    let mut circuit = Circuit::with_size("interference", 1, 1);
    circuit.h(QubitId(0)).unwrap();
    circuit.h(QubitId(0)).unwrap();
    circuit.measure(QubitId(0), ClbitId(0)).unwrap();
    circuit
}

fn observer() -> Circuit {
    let mut circuit = Circuit::with_size("observer", 2, 1);
    circuit.h(QubitId(0)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.h(QubitId(0)).unwrap();
    circuit.measure(QubitId(0), ClbitId(0)).unwrap();
    circuit
}

#[tokio::test]
async fn test_interference_is_deterministic() {
    let backend = SimulatorBackend::new();
    let result = backend.run(&interference(), 2048).await.unwrap();

    assert_eq!(result.counts.get("0"), 2048);
    assert_eq!(result.counts.len(), 1);
}

#[tokio::test]
async fn test_interference_without_passes_matches() {
    let backend = SimulatorBackend::new().without_passes();
    let exe = backend.compile(&interference()).await.unwrap();
    assert_eq!(exe.circuit().num_ops(), 3);

    let result = backend.execute(&exe, 2048).await.unwrap();
    assert_eq!(result.counts.get("0"), 2048);
}

#[tokio::test]
async fn test_observer_survives_compilation() {
    let backend = SimulatorBackend::new();
    let circuit = observer();
    let exe = backend.compile(&circuit).await.unwrap();

    assert_eq!(exe.circuit(), &circuit);
    assert_eq!(exe.backend(), "simulator");
}

#[tokio::test]
async fn test_observer_is_balanced() {
    let backend = SimulatorBackend::with_seed(2048);
    let result = backend.run(&observer(), 2048).await.unwrap();

    let zeros = result.counts.get("0");
    let ones = result.counts.get("1");
    assert_eq!(zeros + ones, 2048);
    assert!((724..=1324).contains(&zeros), "zeros = {zeros}");
    assert!((724..=1324).contains(&ones), "ones = {ones}");
}

#[tokio::test]
async fn test_backend_reuse_is_self_contained() {
    let backend = SimulatorBackend::with_seed(9);
    let first = backend.run(&observer(), 256).await.unwrap();
    let _ = backend.run(&interference(), 256).await.unwrap();
    let again = backend.run(&observer(), 256).await.unwrap();

    assert_eq!(first.counts, again.counts);
}

#[tokio::test]
async fn test_executable_from_other_backend_rejected() {
    let small = SimulatorBackend::new().with_capabilities(
        slitlab_hal::Capabilities::simulator(4).with_name("small"),
    );
    let exe = small.compile(&observer()).await.unwrap();

    let backend = SimulatorBackend::new();
    let result = backend.execute(&exe, 10).await;
    assert!(matches!(result, Err(HalError::BackendMismatch { .. })));
}
