pub mod core {
    pub mod config;
    pub mod error;
    pub mod startup;
    pub mod state;
    pub mod tracing_init;
}

pub mod api {
    pub mod admin;
    pub mod announcements;
    pub mod auth;
    pub mod client;
    pub mod envelope;
    pub mod leave;
    pub mod legacy;
    pub mod teacher;
    pub mod timetable;
    pub mod uploads;

    #[cfg(test)]
    pub mod mock_backend;
}

pub mod models {
    pub mod catalog;
    pub mod requests;
    pub mod session;
    pub mod timetable;
}

pub mod session {
    pub mod guard;
    pub mod manager;
}

pub mod stores {
    pub mod file_storage;
    pub mod session_storage;
}

pub mod conflicts {
    pub mod checker;
}

pub mod views {
    pub mod filter;
    pub mod loader;
}

pub mod utils {
    pub mod query;
}
