pub mod shared {
    pub mod core {
        pub mod aggregate;
        pub mod primitives;
    }
    pub mod application {
        pub mod errors;
    }
    pub mod infrastructure {
        pub mod database;
        pub mod event_store;
        pub mod intent_outbox;
        pub mod repository;
    }
}

pub mod modules {
    pub mod members {
        pub mod core {
            pub mod member;
            pub mod ports;
        }
        pub mod manager_graph;
        pub mod permissions;
        pub mod use_cases {
            pub mod assign_manager {
                pub mod handler;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod members_in_memory;
                pub mod members_sqlite;
            }
        }
    }

    pub mod organizations {
        pub mod core {
            pub mod decide;
            pub mod events;
            pub mod state;
        }
        pub mod use_cases {
            pub mod manage_organization {
                pub mod command;
                pub mod handler;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod projections;
            }
        }
    }

    pub mod work_log {
        pub mod core {
            pub mod record;
            pub mod status;
            pub mod entry {
                pub mod decide;
                pub mod events;
                pub mod state;
            }
            pub mod absence {
                pub mod decide;
                pub mod events;
                pub mod state;
            }
        }
        pub mod daily_limit;
        pub mod month_lock;
        pub mod use_cases {
            pub mod record_work_log_entry {
                pub mod command;
                pub mod handler;
            }
            pub mod record_absence {
                pub mod command;
                pub mod handler;
            }
            pub mod month_calendar {
                pub mod handler;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod projections;
            }
        }
    }

    pub mod approvals {
        pub mod core {
            pub mod decide;
            pub mod events;
            pub mod intents;
            pub mod state;
        }
        pub mod use_cases {
            pub mod approval_workflow {
                pub mod daily;
                pub mod handler;
                pub mod transitions;
            }
            pub mod approval_queue {
                pub mod handler;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod daily_rejection_log;
                pub mod day_notice_sequence;
                pub mod intent_outbox;
                pub mod projections;
            }
        }
    }
}

pub mod shell;
