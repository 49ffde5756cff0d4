use chrono::Local;

use desk_pad::TaskListController;
use desk_pad::TaskStore;

/// Prints today's task list from the default data directory.
fn main() {
    env_logger::init();

    let data_dir = TaskStore::default_data_dir()
        .expect("this platform exposes no per-user data directory");
    let store = TaskStore::new(data_dir);

    let controller = TaskListController::open(store, Local::now().date_naive()).unwrap();
    println!("Tasks for {}:", controller.active_date());
    if controller.tasks().is_empty() {
        println!("  (none)");
    }
    for (text, _done) in controller.rows() {
        println!("  {}", text);
    }
    controller.shutdown().unwrap();
}
