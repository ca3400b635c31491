pub mod student;

pub use student::{
    AddStudentForm, ApiMessage, NewStudent, Student, StudentChanges, UniqueNumber,
    UpdateStudentForm,
};
