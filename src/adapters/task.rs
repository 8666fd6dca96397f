//! Named thread spawning for background monitors.
//!
//! On VEXos, `std::thread` maps onto the scheduler's tasks, so a blocking
//! loop on its own thread does not hold up the competition control loop.
//! On the host it is a plain OS thread.

use anyhow::Context;

/// Spawn `f` on a new thread called `name` with a `stack_kb` stack.
pub fn spawn_named<T, F>(
    name: &'static str,
    stack_kb: usize,
    f: F,
) -> anyhow::Result<std::thread::JoinHandle<T>>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    log::info!("Spawning '{}' (stack={}KB)", name, stack_kb);

    std::thread::Builder::new()
        .name(name.into())
        .stack_size(stack_kb * 1024)
        .spawn(f)
        .with_context(|| format!("failed to spawn thread '{name}'"))
}
