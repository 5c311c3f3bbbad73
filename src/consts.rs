/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Number of columns in a month grid
pub const DAYS_PER_WEEK: u8 = 7;

/// Weekday offset of Sunday (the grid's first column)
pub const SUNDAY_OFFSET: u8 = 0;

/// English month names (index 0 is unused, months are 1-indexed)
pub const MONTH_NAMES: [&str; 13] = [
    "",
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Grid header labels, Sunday first
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Hour/minute separator of a time slot
pub const TIME_SEPARATOR: char = ':';

/// First slot of the default hourly grid
pub const FIRST_SLOT_HOUR: u8 = 8;
/// Last slot of the default hourly grid (inclusive)
pub const LAST_SLOT_HOUR: u8 = 17;
/// Largest representable hour of a slot
pub const MAX_HOUR: u8 = 23;

/// Age slider bounds
pub const MIN_AGE: u8 = 1;
pub const MAX_AGE: u8 = 100;
/// Slider position of a freshly opened form
pub const DEFAULT_AGE: u8 = 25;

/// Country code the holiday feed is queried for
pub const DEFAULT_HOLIDAY_COUNTRY: &str = "PL";

/// Holiday feed type tag that blocks bookings
pub const NATIONAL_HOLIDAY_TAG: &str = "NATIONAL_HOLIDAY";
/// Holiday feed type tag for informational entries
pub const OBSERVANCE_TAG: &str = "OBSERVANCE";
