pub mod vacancy_service;
