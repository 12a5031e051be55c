//! End-to-end scenarios for FWNL. All content lives under `tests/`.
