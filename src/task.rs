use console::{style, Term};
use std::time::Instant;

pub struct TaskRunner {
    term: Term,
    num_tasks: u32,
    current_task: u32,
    now: Instant,
    descr: String,
    started: bool,
}

impl TaskRunner {
    pub fn new(num_tasks: u32) -> Self {
        Self {
            term: Term::stdout(),
            num_tasks,
            current_task: 0,
            now: Instant::now(),
            descr: "".into(),
            started: false,
        }
    }

    fn task_id(&self) -> String {
        style(format!("[{}/{}]", self.current_task + 1, self.num_tasks))
            .force_styling(true)
            .to_string()
    }

    pub fn start_task(&mut self, descr: impl Into<String>) {
        if self.started {
            self.finish_task("[SKIPPED]".to_string(), true);
        }
        self.now = Instant::now();
        self.descr = descr.into();
        self.started = true;
        println!("{} {}", self.task_id(), &self.descr);
    }

    fn finish_task(&mut self, status: String, clear_last: bool) {
        self.started = false;
        if clear_last {
            self.term.clear_last_lines(1).ok();
        }
        println!("{} {} {}", self.task_id(), &self.descr, status);
        self.current_task += 1;
    }

    pub fn end_task(&mut self) {
        let time = self.now.elapsed();
        self.finish_task(format!("[{}ms]", time.as_millis()), false);
    }

    pub fn fail_task(&mut self, reason: impl std::fmt::Display) {
        self.finish_task(
            style(format!("[FAILED] {}", reason)).red().to_string(),
            false,
        );
    }
}
