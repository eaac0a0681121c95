use iced::font;
use iced::widget::{button, column, container, pick_list, row, scrollable, text, text_input};
use iced::Font;
use iced::{widget, Element, Length, Task};
use std::path::PathBuf;

use process_scheduling::parser;
use process_scheduling::scheduler::{Averages, Policy, ProcessId, ProcessRecord, Schedule};
use process_scheduling::{config::Config, error::Error, SchedulerEngine};

const BOLD: Font = Font {
    weight: font::Weight::Bold,
    ..Font::DEFAULT
};
const CELL_WIDTH: u16 = 120;

fn main() -> iced::Result {
    env_logger::init();
    iced::application("Process Scheduling", Simulator::update, Simulator::view)
        .run_with(Simulator::new)
}

// Form fields are kept as typed, parsed when a workload is needed
#[derive(Debug, Clone)]
struct ProcessRow {
    id: ProcessId,
    arrival: String,
    burst: String,
    priority: String,
}

impl From<&ProcessRecord> for ProcessRow {
    fn from(process: &ProcessRecord) -> Self {
        Self {
            id: process.id,
            arrival: process.arrival.to_string(),
            burst: process.burst.to_string(),
            priority: process.priority.to_string(),
        }
    }
}

struct Simulator {
    engine: SchedulerEngine,
    policy: Policy,
    rows: Vec<ProcessRow>,
    // Policy and outcome of the last calculation
    schedule: Option<(Policy, Schedule)>,
}

#[derive(Debug, Clone)]
enum Message {
    PolicySelected(Policy),
    AddProcess,
    RemoveProcess(usize),
    ArrivalChanged(usize, String),
    BurstChanged(usize, String),
    PriorityChanged(usize, String),
    Calculate,
    OpenFile,
    FilePicked(Result<PathBuf, Error>),
    WorkloadLoaded(Result<Vec<ProcessRecord>, Error>),
    SaveWorkload,
    ExportResults,
    Saved(Result<PathBuf, Error>),
    DialogResult(rfd::MessageDialogResult),
}

impl Simulator {
    fn new() -> (Self, Task<Message>) {
        // Read the config file, if no file is found use the default config
        let config = Config::load();

        (
            Self {
                engine: SchedulerEngine::new(config),
                policy: config.scheduler.unwrap_or(Policy::Fcfs),
                rows: vec![],
                schedule: None,
            },
            Task::none(),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PolicySelected(policy) => {
                self.policy = policy;
                Task::none()
            }
            Message::AddProcess => {
                let id = self.rows.iter().map(|row| row.id).max().unwrap_or(0) + 1;
                self.rows.push(ProcessRow {
                    id,
                    arrival: "0".to_string(),
                    burst: "0".to_string(),
                    priority: "0".to_string(),
                });
                Task::none()
            }
            Message::RemoveProcess(index) => {
                if index < self.rows.len() {
                    self.rows.remove(index);
                }
                Task::none()
            }
            Message::ArrivalChanged(index, value) => {
                if let Some(row) = self.rows.get_mut(index) {
                    row.arrival = value;
                }
                Task::none()
            }
            Message::BurstChanged(index, value) => {
                if let Some(row) = self.rows.get_mut(index) {
                    row.burst = value;
                }
                Task::none()
            }
            Message::PriorityChanged(index, value) => {
                if let Some(row) = self.rows.get_mut(index) {
                    row.priority = value;
                }
                Task::none()
            }
            Message::Calculate => match self.calculate() {
                Ok(schedule) => {
                    self.schedule = Some((self.policy, schedule));
                    Task::none()
                }
                Err(error) => show_error("Invalid Input", error),
            },
            Message::OpenFile => Task::perform(pick_workload(), Message::FilePicked),
            Message::FilePicked(Ok(path)) => {
                Task::perform(read_workload(path), Message::WorkloadLoaded)
            }
            Message::WorkloadLoaded(Ok(processes)) => {
                log::info!("Loaded {} processes", processes.len());
                self.rows = processes.iter().map(ProcessRow::from).collect();
                self.schedule = None;
                Task::none()
            }
            Message::SaveWorkload => {
                let contents = self
                    .records()
                    .and_then(|processes| parser::workload_to_json(&processes));
                match contents {
                    Ok(contents) => Task::perform(
                        save_file(contents, "Save workload...", "workload.json"),
                        Message::Saved,
                    ),
                    Err(error) => show_error("Invalid Input", error),
                }
            }
            Message::ExportResults => {
                let Some((policy, schedule)) = &self.schedule else {
                    return Task::none();
                };
                match parser::report_to_json(*policy, schedule) {
                    Ok(contents) => Task::perform(
                        save_file(contents, "Export results...", "results.json"),
                        Message::Saved,
                    ),
                    Err(error) => show_error("Error", error),
                }
            }
            Message::Saved(Ok(path)) => {
                log::info!("Saved {}", path.display());
                Task::none()
            }
            Message::FilePicked(Err(Error::DialogClosed))
            | Message::WorkloadLoaded(Err(Error::DialogClosed))
            | Message::Saved(Err(Error::DialogClosed)) => Task::none(),
            Message::FilePicked(Err(error))
            | Message::WorkloadLoaded(Err(error))
            | Message::Saved(Err(error)) => show_error("Error", error),
            Message::DialogResult(_result) => Task::none(),
        }
    }

    fn records(&self) -> Result<Vec<ProcessRecord>, Error> {
        self.rows
            .iter()
            .map(|row| parser::parse_process(row.id, &row.arrival, &row.burst, &row.priority))
            .collect()
    }

    fn calculate(&self) -> Result<Schedule, Error> {
        let processes = self.records()?;
        self.engine.run(self.policy, &processes)
    }

    fn view(&self) -> Element<'_, Message> {
        let has_results = self.schedule.is_some();
        let menu_bar = row![
            button("Open").on_press(Message::OpenFile),
            button("Save").on_press(Message::SaveWorkload),
            button("Export Results").on_press_maybe(has_results.then_some(Message::ExportResults)),
            widget::Space::new(Length::Shrink, Length::Fill)
        ]
        .spacing(10)
        .height(40)
        .padding([5, 10]);

        let selector = row![
            text("Select Scheduling Algorithm:"),
            pick_list(Policy::ALL, Some(self.policy), Message::PolicySelected),
            button("Add Process").on_press(Message::AddProcess),
            button("Calculate").on_press(Message::Calculate),
        ]
        .spacing(10)
        .align_y(iced::alignment::Vertical::Center)
        .padding([5, 10]);

        widget::container(
            column![
                menu_bar,
                selector,
                row![self.view_processes(), self.view_results()]
                    .spacing(40)
                    .padding([10, 10])
            ]
            .spacing(10),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    fn view_processes(&self) -> Element<'_, Message> {
        // Priority only matters to the priority policies
        let show_priority = self.policy.uses_priority();

        let mut header = row![
            header_cell("Process ID"),
            header_cell("Arrival Time"),
            header_cell("Burst Time")
        ]
        .spacing(10);
        if show_priority {
            header = header.push(header_cell("Priority"));
        }

        let mut processes = column![header].spacing(5).padding([5, 10]);
        if show_priority {
            let priority = self.engine.config().priority;
            let order = match self.policy {
                Policy::PriorityNonPreemptive => priority.non_preemptive,
                _ => priority.preemptive,
            };
            processes = processes.push(text(format!("Priority: {}", order)).size(14));
        }
        for (index, process) in self.rows.iter().enumerate() {
            let mut line = row![
                text(process.id.to_string()).width(CELL_WIDTH),
                text_input("0", &process.arrival)
                    .on_input(move |value| Message::ArrivalChanged(index, value))
                    .width(CELL_WIDTH),
                text_input("0", &process.burst)
                    .on_input(move |value| Message::BurstChanged(index, value))
                    .width(CELL_WIDTH),
            ]
            .spacing(10);
            if show_priority {
                line = line.push(
                    text_input("0", &process.priority)
                        .on_input(move |value| Message::PriorityChanged(index, value))
                        .width(CELL_WIDTH),
                );
            }
            line = line.push(button("Remove").on_press(Message::RemoveProcess(index)));
            processes = processes.push(line);
        }

        container(scrollable(processes))
            .height(Length::Fill)
            .width(Length::FillPortion(1))
            .style(container::rounded_box)
            .into()
    }

    fn view_results(&self) -> Element<'_, Message> {
        let mut results = column![
            text("Results").font(BOLD).size(20),
            row![
                header_cell("Process ID"),
                header_cell("Start Time"),
                header_cell("End Time"),
                header_cell("Waiting Time"),
                header_cell("Turnaround Time"),
                header_cell("Response Time")
            ]
            .spacing(10)
        ]
        .spacing(5)
        .padding([5, 10]);

        if let Some((policy, schedule)) = &self.schedule {
            for result in &schedule.results {
                results = results.push(
                    row![
                        value_cell(result.id),
                        value_cell(result.start),
                        value_cell(result.end),
                        value_cell(result.waiting),
                        value_cell(result.turnaround),
                        value_cell(result.response)
                    ]
                    .spacing(10),
                );
            }

            let timeline = schedule
                .timeline
                .iter()
                .map(|slice| format!("P{} [{}-{}]", slice.id, slice.start, slice.end))
                .collect::<Vec<_>>()
                .join("  ");

            let averages = match Averages::from_results(&schedule.results) {
                Some(averages) => averages.to_string(),
                None => "No data".to_string(),
            };

            results = results
                .push(
                    text(if policy.is_preemptive() {
                        format!("Timeline ({}, preemptive)", policy)
                    } else {
                        format!("Timeline ({})", policy)
                    })
                    .font(BOLD),
                )
                .push(text(timeline))
                .push(text(format!(
                    "Finished at {}, CPU idle for {}",
                    schedule.makespan(),
                    schedule.idle_time()
                )))
                .push(text("Average Times").font(BOLD).size(18))
                .push(text(averages));
        }

        container(scrollable(results))
            .height(Length::Fill)
            .width(Length::FillPortion(2))
            .style(container::rounded_box)
            .into()
    }
}

fn header_cell(label: &str) -> Element<'_, Message> {
    text(label).font(BOLD).width(CELL_WIDTH).into()
}

fn value_cell<'a>(value: impl ToString) -> Element<'a, Message> {
    text(value.to_string()).width(CELL_WIDTH).into()
}

fn show_error(title: &str, error: Error) -> Task<Message> {
    log::warn!("{}", error);
    let dialog = rfd::AsyncMessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title(title)
        .set_description(format!("{}", error))
        .set_buttons(rfd::MessageButtons::Ok)
        .show();

    Task::perform(dialog, Message::DialogResult)
}

async fn pick_workload() -> Result<PathBuf, Error> {
    let handle = rfd::AsyncFileDialog::new()
        .set_title("Choose a workload...")
        .add_filter("Workload", &["json", "txt"])
        .pick_file()
        .await
        .ok_or(Error::DialogClosed)?;

    Ok(handle.path().to_owned())
}

async fn read_workload(path: PathBuf) -> Result<Vec<ProcessRecord>, Error> {
    let file_name = path.file_name().ok_or(Error::NotFile)?;
    let file_name = file_name.to_string_lossy().to_string();

    let contents = tokio::fs::read(&path)
        .await
        .map_err(|error| error.kind())
        .map_err(Error::IO)?;

    parser::read_workload_file(&file_name, &contents)
}

async fn save_file(
    contents: String,
    title: &'static str,
    file_name: &'static str,
) -> Result<PathBuf, Error> {
    let handle = rfd::AsyncFileDialog::new()
        .set_title(title)
        .set_file_name(file_name)
        .add_filter("JSON", &["json"])
        .save_file()
        .await
        .ok_or(Error::DialogClosed)?;

    let path = handle.path().to_owned();
    tokio::fs::write(&path, contents)
        .await
        .map_err(|error| error.kind())
        .map_err(Error::IO)?;

    Ok(path)
}
