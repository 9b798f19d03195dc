//! Diesel table definitions matching `backend/migrations`.
//!
//! Keep in sync with the SQL by hand or regenerate with
//! `diesel print-schema` against a migrated database.

diesel::table! {
    /// Teaching periods. At most one row has `is_active` set (partial
    /// unique index).
    school_years (id) {
        id -> Int4,
        #[max_length = 50]
        name -> Varchar,
        start_date -> Date,
        end_date -> Date,
        is_active -> Bool,
    }
}

diesel::table! {
    /// Classes, each owned by a school year.
    classes (id) {
        id -> Int4,
        #[max_length = 50]
        name -> Varchar,
        school_year_id -> Int4,
    }
}

diesel::table! {
    /// Pupils, each owned by a class.
    pupils (id) {
        id -> Int4,
        #[max_length = 100]
        first_name -> Varchar,
        #[max_length = 100]
        last_name -> Varchar,
        class_id -> Int4,
    }
}

diesel::table! {
    /// Bilingual entry categories.
    categories (id) {
        id -> Int4,
        #[max_length = 100]
        name_de -> Varchar,
        #[max_length = 100]
        name_en -> Varchar,
        is_predefined -> Bool,
    }
}

diesel::table! {
    /// Dated observations about a pupil.
    entries (id) {
        id -> Int4,
        pupil_id -> Int4,
        category_id -> Int4,
        date -> Date,
        text -> Text,
        #[max_length = 10]
        grade -> Nullable<Varchar>,
        #[max_length = 100]
        subject -> Nullable<Varchar>,
    }
}

diesel::joinable!(classes -> school_years (school_year_id));
diesel::joinable!(pupils -> classes (class_id));
diesel::joinable!(entries -> pupils (pupil_id));
diesel::joinable!(entries -> categories (category_id));

diesel::allow_tables_to_appear_in_same_query!(school_years, classes, pupils, categories, entries);
