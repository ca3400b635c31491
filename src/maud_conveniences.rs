use crate::roster::{Dialog, DialogKind};
use maud::{Markup, Render, html};

pub fn render_table<const N: usize>(
    overall_title: &'static str,
    titles: [&'static str; N],
    items: Vec<[Markup; N]>,
) -> Markup {
    html! {
        div class="container mx-auto" {
            (title(overall_title))
            div class="overflow-x-auto" {
                table id="student-list" class="min-w-full bg-gray-800 rounded shadow-md" {
                    thead class="bg-gray-700" {
                        tr {
                            @for title in titles {
                                th class="py-2 px-4 text-left font-semibold text-gray-300" {(title)}
                            }
                        }
                    }
                    tbody {
                        @for row in items {
                            tr {
                                @for col in row {
                                    td class="py-2 px-4 border-b border-gray-600 text-gray-200" {(col)}
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 class="text-2xl font-semibold mb-4" {(s)}
    }
}

pub fn subtitle(s: impl Render) -> Markup {
    html! {
        h2 class="text-xl font-semibold mb-2" {(s)}
    }
}

/// A labelled text-ish input. `ty` defaults to `text`.
pub fn simple_form_element(
    id: &str,
    name: &str,
    label: &str,
    required: bool,
    ty: Option<&str>,
    placeholder: Option<&str>,
) -> Markup {
    html! {
        div class="mb-4" {
            label for=(id) class="block text-sm font-bold mb-2 text-gray-300" {(label)}
            input required[required] type=(ty.unwrap_or("text")) id=(id) name=(name) placeholder=[placeholder] class="shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600";
        }
    }
}

pub fn form_submit_button(text: Option<&str>) -> Markup {
    html! {
        div class="flex items-center justify-between" {
            button type="submit" class="bg-blue-500 hover:bg-blue-700 font-bold py-2 px-4 rounded focus:outline-none focus:shadow-outline" {
                (text.unwrap_or("Submit"))
            }
        }
    }
}

/// Blocking overlay listing every queued dialog; empty when there is nothing to say.
pub fn render_dialogs(dialogs: &[Dialog]) -> Markup {
    html! {
        @if !dialogs.is_empty() {
            div class="fixed inset-0 bg-black/60 flex items-center justify-center z-50" {
                div role="alertdialog" class="bg-gray-800 rounded shadow-md p-6 max-w-md w-full flex flex-col space-y-4" {
                    @for dialog in dialogs {
                        @match dialog.kind {
                            DialogKind::Info => {
                                p class="dialog-info bg-green-100 border border-green-400 text-green-700 px-4 py-3 rounded" {(dialog.text)}
                            },
                            DialogKind::Error => {
                                p class="dialog-error bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded" {(dialog.text)}
                            },
                        }
                    }
                    button class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" hx-post="/internal/dialogs/dismiss" hx-swap="none" {
                        "OK"
                    }
                }
            }
        }
    }
}
