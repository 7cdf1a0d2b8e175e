//! Process-wide embedded PostgreSQL cluster for integration tests.
//!
//! `pg-embed-setup-unpriv` keeps one shared cluster alive for the test binary.
//! Bootstrap can fail transiently while binaries download, so the handle is
//! requested with a bounded retry. The library's fixture layer panics when no
//! worker binary is available; that panic is caught and reported as an error
//! so the `SKIP_TEST_CLUSTER` policy can decide what happens next.

use std::any::Any;
use std::panic::{UnwindSafe, catch_unwind};
use std::time::Duration;

use pg_embedded_setup_unpriv::ClusterHandle;
use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;

const SHARED_CLUSTER_RETRIES: u32 = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Return the shared cluster, retrying transient bootstrap failures.
///
/// # Errors
/// Returns the last bootstrap error, or the panic message when bootstrap
/// panicked.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    catch_bootstrap_panic(retry_shared_cluster)
}

fn retry_shared_cluster() -> Result<&'static ClusterHandle, String> {
    let mut attempt: u32 = 1;
    loop {
        match shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt < SHARED_CLUSTER_RETRIES => {
                eprintln!(
                    "pg-embed: bootstrap attempt {attempt}/{SHARED_CLUSTER_RETRIES} failed: {error:?}"
                );
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY * attempt);
                attempt += 1;
            }
            Err(error) => return Err(format!("{error:?}")),
        }
    }
}

fn catch_bootstrap_panic<T>(
    bootstrap: impl FnOnce() -> Result<T, String> + UnwindSafe,
) -> Result<T, String> {
    catch_unwind(bootstrap).unwrap_or_else(|payload| Err(panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "cluster bootstrap panicked".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn bootstrap_panic_becomes_an_error() {
        let result: Result<(), String> =
            catch_bootstrap_panic(|| panic!("pg_worker binary was not found"));

        assert_eq!(result, Err("pg_worker binary was not found".to_owned()));
    }

    #[rstest]
    fn formatted_panic_message_is_kept() {
        let worker = "pg_worker";
        let result: Result<(), String> =
            catch_bootstrap_panic(|| panic!("{worker} binary was not found"));

        assert_eq!(result, Err("pg_worker binary was not found".to_owned()));
    }

    #[rstest]
    fn bootstrap_errors_pass_through() {
        let result: Result<(), String> = catch_bootstrap_panic(|| Err("download failed".to_owned()));

        assert_eq!(result, Err("download failed".to_owned()));
    }
}
