mod admin;
mod contact;
mod pages;
mod resources;
mod sections;
mod uploads;
