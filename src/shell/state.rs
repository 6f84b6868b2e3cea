use crate::modules::approvals::use_cases::approval_queue::handler::ApprovalQueries;
use crate::modules::approvals::use_cases::approval_workflow::handler::ApprovalWorkflowService;
use crate::modules::members::core::ports::MemberDirectory;
use crate::modules::members::use_cases::assign_manager::handler::AssignManagerHandler;
use crate::modules::organizations::use_cases::manage_organization::handler::OrganizationService;
use crate::modules::work_log::use_cases::month_calendar::handler::CalendarQueries;
use crate::modules::work_log::use_cases::record_absence::handler::AbsenceHandler;
use crate::modules::work_log::use_cases::record_work_log_entry::handler::WorkLogEntryHandler;
use crate::shared::infrastructure::database::Database;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub entries: Arc<WorkLogEntryHandler>,
    pub absences: Arc<AbsenceHandler>,
    pub workflow: Arc<ApprovalWorkflowService>,
    pub approvals: Arc<ApprovalQueries>,
    pub calendar: Arc<CalendarQueries>,
    pub managers: Arc<AssignManagerHandler>,
    pub organizations: Arc<OrganizationService>,
}

impl AppState {
    pub fn new(
        db: Database,
        directory: Arc<dyn MemberDirectory>,
        outbox: Arc<dyn DomainOutbox>,
        topic: &str,
    ) -> Self {
        Self {
            entries: Arc::new(WorkLogEntryHandler::new(db.clone(), directory.clone())),
            absences: Arc::new(AbsenceHandler::new(db.clone(), directory.clone())),
            workflow: Arc::new(ApprovalWorkflowService::new(
                db.clone(),
                directory.clone(),
                outbox,
                topic,
            )),
            approvals: Arc::new(ApprovalQueries::new(db.clone(), directory.clone())),
            calendar: Arc::new(CalendarQueries::new(db.clone(), directory.clone())),
            managers: Arc::new(AssignManagerHandler::new(directory)),
            organizations: Arc::new(OrganizationService::new(db.clone())),
            db,
        }
    }
}
